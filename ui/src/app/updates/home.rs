use crate::app::model::Model;
use crate::app::router::Route;
use crate::components::calendar_picker::CalendarPicker;
use crate::components::common::{CalendarActivityMsg, ComponentId, Msg};
use crate::error::{AppError, AppResult};
use crate::utils::format::format_brl;
use tuirealm::terminal::TerminalAdapter;

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn mount_home(&mut self) -> AppResult<()> {
        let selection = self.selection.snapshot();
        let mut rows = Vec::new();
        if let Some(service) = &selection.service {
            rows.push((
                "Serviço".to_string(),
                format!("{} ({})", service.nome, format_brl(service.preco)),
            ));
        }
        if let Some(barber) = &selection.barber {
            rows.push(("Profissional".to_string(), barber.nome.clone()));
        }

        let at_earliest = self.calendar.current() == self.calendar.earliest();
        self.app
            .remount(
                ComponentId::CalendarPicker,
                Box::new(CalendarPicker::new(self.calendar.label(), at_earliest, rows)),
                Vec::default(),
            )
            .map_err(|e| AppError::Component(e.to_string()))?;
        Ok(())
    }

    /// Move the booking date. The booking page refetches slots for it.
    pub fn update_calendar(&mut self, msg: CalendarActivityMsg) -> Option<Msg> {
        let date = match msg {
            CalendarActivityMsg::PrevDay => self.calendar.prev_day(),
            CalendarActivityMsg::NextDay => self.calendar.next_day(),
        };
        log::debug!("Booking date set to {date}");

        let result = match self.state_manager.route {
            Route::Home => self.mount_home(),
            Route::Booking => self.change_wizard_date(date),
            _ => Ok(()),
        };
        result.err().map(Msg::Error)
    }
}
