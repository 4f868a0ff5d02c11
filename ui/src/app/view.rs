use crate::components::common::{ComponentId, Msg};
use crate::error::AppError;
use tuirealm::ratatui::layout::{Constraint, Direction, Layout, Rect};
use tuirealm::ratatui::widgets::Clear;
use tuirealm::{Application, Frame, NoUserEvent};

type App = Application<ComponentId, Msg, NoUserEvent>;

/// Rectangle of at most `width` x `height`, centred in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// Render an overlay centred on the screen and hand it the focus
fn view_overlay(
    app: &mut App,
    f: &mut Frame,
    id: &ComponentId,
    width: u16,
    height: u16,
) -> Result<(), AppError> {
    let area = centered(f.area(), width, height);
    f.render_widget(Clear, area);
    app.view(id, f, area);

    app.active(id)
        .map_err(|e| AppError::Component(e.to_string()))?;
    Ok(())
}

/// Draw the page, then whichever overlay is on top of it.
pub fn with_popup<F>(app: &mut App, f: &mut Frame, chunks: &[Rect], view_fn: F) -> Result<(), AppError>
where
    F: FnOnce(&mut App, &mut Frame, &[Rect]) -> Result<(), AppError>,
{
    view_fn(app, f, chunks)?;

    if app.mounted(&ComponentId::ErrorPopup) {
        return view_overlay(app, f, &ComponentId::ErrorPopup, 60, 10);
    }
    if app.mounted(&ComponentId::SuccessPopup) {
        return view_overlay(app, f, &ComponentId::SuccessPopup, 60, 8);
    }
    if app.mounted(&ComponentId::LoadingIndicator) {
        return view_overlay(app, f, &ComponentId::LoadingIndicator, 50, 5);
    }
    Ok(())
}

fn split_horizontal(area: Rect, left: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(left), Constraint::Percentage(100 - left)].as_ref())
        .split(area)
}

pub fn view_home(app: &mut App, f: &mut Frame, chunks: &[Rect]) -> Result<(), AppError> {
    app.view(&ComponentId::CalendarPicker, f, centered(chunks[3], 60, 14));
    Ok(())
}

pub fn view_services(app: &mut App, f: &mut Frame, chunks: &[Rect]) -> Result<(), AppError> {
    app.view(&ComponentId::ServiceList, f, chunks[3]);
    Ok(())
}

pub fn view_barbers(app: &mut App, f: &mut Frame, chunks: &[Rect]) -> Result<(), AppError> {
    app.view(&ComponentId::BarberList, f, chunks[3]);
    Ok(())
}

pub fn view_booking(app: &mut App, f: &mut Frame, chunks: &[Rect]) -> Result<(), AppError> {
    let main_chunks = split_horizontal(chunks[3], 55);
    app.view(&ComponentId::WizardList, f, main_chunks[0]);
    app.view(&ComponentId::BookingSummary, f, main_chunks[1]);
    Ok(())
}

pub fn view_client_area(app: &mut App, f: &mut Frame, chunks: &[Rect]) -> Result<(), AppError> {
    let main_chunks = split_horizontal(chunks[3], 45);
    app.view(&ComponentId::ProfilePanel, f, main_chunks[0]);
    app.view(&ComponentId::RecentBookings, f, main_chunks[1]);

    // Profile editing opens on top of the page
    if app.mounted(&ComponentId::InputForm) {
        let area = centered(chunks[3], 60, 14);
        f.render_widget(Clear, area);
        app.view(&ComponentId::InputForm, f, area);
    }
    Ok(())
}

pub fn view_login(app: &mut App, f: &mut Frame, chunks: &[Rect]) -> Result<(), AppError> {
    app.view(&ComponentId::InputForm, f, centered(chunks[3], 60, 18));
    Ok(())
}
