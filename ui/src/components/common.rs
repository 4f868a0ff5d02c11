use crate::app::router::Route;
use crate::error::AppError;
use client::booking::WizardEvent;
use client::model::{Barber, CustomerDetails, CustomerPublic, Service, UserView};

#[derive(Debug, Eq, PartialEq, Clone, Hash)]
pub enum ComponentId {
    TextLabel,
    GlobalKeyWatcher,
    CalendarPicker,
    ServiceList,
    BarberList,
    WizardList,
    BookingSummary,
    ProfilePanel,
    RecentBookings,
    InputForm,
    ErrorPopup,
    SuccessPopup,
    LoadingIndicator,
}

#[derive(Debug, PartialEq, Default)]
pub enum Msg {
    #[default]
    AppClose,
    ForceRedraw,
    Navigate(Route),
    Logout,
    SessionChanged(Option<UserView>),
    ListActivity(ListActivityMsg),
    CalendarActivity(CalendarActivityMsg),
    CatalogActivity(CatalogActivityMsg),
    BookingActivity(BookingActivityMsg),
    ClientAreaActivity(ClientAreaActivityMsg),
    FormActivity(FormActivityMsg),
    AuthActivity(AuthActivityMsg),
    LoadingActivity(LoadingActivityMsg),
    PopupActivity(PopupActivityMsg),
    Error(AppError),
}

/// Selection in any of the list pickers, tagged with the list it came from.
#[derive(Debug, PartialEq)]
pub enum ListActivityMsg {
    Picked { list: ComponentId, index: usize },
    Back(ComponentId),
}

#[derive(Debug, PartialEq)]
pub enum CalendarActivityMsg {
    PrevDay,
    NextDay,
}

#[derive(Debug, PartialEq)]
pub enum CatalogActivityMsg {
    ServicesLoaded(Vec<Service>),
    BarbersLoaded(Vec<Barber>),
}

#[derive(Debug, PartialEq)]
pub enum BookingActivityMsg {
    Confirm,
    CyclePayment,
    Event(WizardEvent),
}

#[derive(Debug, PartialEq)]
pub enum ClientAreaActivityMsg {
    ProfileLoaded(CustomerDetails),
    ProfileSaved(CustomerPublic),
    EditProfile,
}

/// Raised by the input form; field values are read back from the
/// component state, never carried in the message.
#[derive(Debug, PartialEq)]
pub enum FormActivityMsg {
    Submit,
    Cancel,
    ToggleMode,
}

#[derive(Debug, PartialEq)]
pub enum AuthActivityMsg {
    SignedIn(UserView),
}

#[derive(Debug, PartialEq)]
pub enum LoadingActivityMsg {
    Start(String),
    Stop,
}

#[derive(Debug, PartialEq)]
pub enum PopupActivityMsg {
    ShowError(AppError),
    ShowWarning(String),
    ShowSuccess(String),
    CloseError,
    CloseSuccess,
}
