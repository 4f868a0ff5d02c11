use super::surface;
use crate::app::model::Model;
use crate::app::router::Route;
use crate::components::common::{CatalogActivityMsg, ComponentId, Msg};
use crate::components::list_picker::ListPicker;
use crate::error::{AppError, AppResult};
use crate::utils::format::{format_brl, format_duration, initials, mask_phone};
use client::booking::wizard::{MSG_BARBERS_FAILED, MSG_SERVICES_FAILED};
use client::model::{Barber, Service, sort_by_name};
use tuirealm::terminal::TerminalAdapter;

const LOAD_SERVICES: &str = "load_services";
const LOAD_BARBERS: &str = "load_barbers";

/// "Corte · R$ 30,00 · 30min"
pub fn service_row(service: &Service) -> String {
    format!(
        "{} · {} · {}",
        service.nome,
        format_brl(service.preco),
        format_duration(service.duracao)
    )
}

/// "[JS] João Silva · (11) 91234-5678"
pub fn barber_row(barber: &Barber) -> String {
    let mut row = format!("[{}] {}", initials(&barber.nome), barber.nome);
    if let Some(telefone) = barber.telefone.as_deref().filter(|t| !t.is_empty()) {
        row.push_str(" · ");
        row.push_str(&mask_phone(telefone));
    }
    row
}

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn enter_services(&mut self) -> AppResult<()> {
        let loading = self.catalog.services.is_empty();
        if loading {
            self.load_services();
        }
        self.remount_service_list(loading)
    }

    pub fn enter_barbers(&mut self) -> AppResult<()> {
        let loading = self.catalog.barbers.is_empty();
        if loading {
            self.load_barbers();
        }
        self.remount_barber_list(loading)
    }

    fn load_services(&self) {
        let backend = self.backend.clone();
        let tx = self.task_manager.sender();
        self.task_manager.execute_cancellable(
            LOAD_SERVICES,
            "Carregando serviços...",
            move |token| async move {
                match backend.list_services(&token).await {
                    Ok(services) => tx
                        .send(Msg::CatalogActivity(CatalogActivityMsg::ServicesLoaded(
                            services,
                        )))
                        .map_err(|e| AppError::Channel(e.to_string())),
                    Err(e) => surface(e, MSG_SERVICES_FAILED),
                }
            },
        );
    }

    fn load_barbers(&self) {
        let backend = self.backend.clone();
        let tx = self.task_manager.sender();
        self.task_manager.execute_cancellable(
            LOAD_BARBERS,
            "Carregando barbeiros...",
            move |token| async move {
                match backend.list_barbers(&token).await {
                    Ok(barbers) => tx
                        .send(Msg::CatalogActivity(CatalogActivityMsg::BarbersLoaded(
                            barbers,
                        )))
                        .map_err(|e| AppError::Channel(e.to_string())),
                    Err(e) => surface(e, MSG_BARBERS_FAILED),
                }
            },
        );
    }

    pub fn update_catalog(&mut self, msg: CatalogActivityMsg) -> Option<Msg> {
        let result = match msg {
            CatalogActivityMsg::ServicesLoaded(mut services) => {
                log::info!("Loaded {} services", services.len());
                sort_by_name(&mut services);
                self.catalog.services = services;
                if self.state_manager.route == Route::Services {
                    self.remount_service_list(false)
                } else {
                    Ok(())
                }
            }
            CatalogActivityMsg::BarbersLoaded(mut barbers) => {
                log::info!("Loaded {} barbers", barbers.len());
                sort_by_name(&mut barbers);
                self.catalog.barbers = barbers;
                if self.state_manager.route == Route::Barbers {
                    self.remount_barber_list(false)
                } else {
                    Ok(())
                }
            }
        };
        result.err().map(Msg::Error)
    }

    /// Preselect the service and continue in the booking wizard.
    pub fn pick_catalog_service(&mut self, index: usize) -> Option<Msg> {
        let service = self.catalog.services.get(index).cloned()?;
        self.selection.handle().set_service(Some(service));
        Some(Msg::Navigate(Route::Booking))
    }

    pub fn pick_catalog_barber(&mut self, index: usize) -> Option<Msg> {
        let barber = self.catalog.barbers.get(index).cloned()?;
        self.selection.handle().set_barber(Some(barber));
        Some(Msg::Navigate(Route::Booking))
    }

    fn remount_service_list(&mut self, loading: bool) -> AppResult<()> {
        let rows = self.catalog.services.iter().map(service_row).collect();
        let list = ListPicker::new(ComponentId::ServiceList, "Serviços", rows).with_placeholder(
            if loading {
                "Carregando serviços..."
            } else {
                "Nenhum serviço disponível."
            },
        );
        self.app
            .remount(ComponentId::ServiceList, Box::new(list), Vec::default())
            .map_err(|e| AppError::Component(e.to_string()))?;
        self.activate_component_for_current_state()
    }

    fn remount_barber_list(&mut self, loading: bool) -> AppResult<()> {
        let rows = self.catalog.barbers.iter().map(barber_row).collect();
        let list = ListPicker::new(ComponentId::BarberList, "Barbeiros", rows).with_placeholder(
            if loading {
                "Carregando barbeiros..."
            } else {
                "Nenhum barbeiro disponível."
            },
        );
        self.app
            .remount(ComponentId::BarberList, Box::new(list), Vec::default())
            .map_err(|e| AppError::Component(e.to_string()))?;
        self.activate_component_for_current_state()
    }
}
