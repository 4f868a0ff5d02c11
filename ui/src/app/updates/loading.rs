use crate::app::model::Model;
use crate::components::common::{LoadingActivityMsg, Msg};
use tuirealm::terminal::TerminalAdapter;

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    /// Loads can overlap; the indicator stays up until the last one stops
    /// and shows the newest message meanwhile.
    pub fn update_loading(&mut self, msg: LoadingActivityMsg) -> Option<Msg> {
        let result = match msg {
            LoadingActivityMsg::Start(message) => {
                log::debug!("Starting loading: {message}");
                self.state_manager.begin_loading(message.clone());
                self.mount_loading_indicator(&message)
            }
            LoadingActivityMsg::Stop => {
                log::debug!("Stopping loading");
                if self.state_manager.end_loading() {
                    self.unmount_loading_indicator()
                } else {
                    Ok(())
                }
            }
        };

        if let Err(e) = result {
            log::error!("Failed to update loading indicator: {e}");
            self.error_reporter.report_loading_error(
                "LoadingIndicator",
                "update",
                "Não foi possível exibir o indicador de carregamento.",
                e,
            );
        }
        None
    }
}
