//! Rendering: flip-book adapter, container surface and the render scheduler.

mod console;
mod scheduler;
mod session;
mod view;
mod widget;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use console::{ConsoleBook, ConsoleFactory, ConsoleView, describe_page};
pub use scheduler::{InitOutcome, RenderRequest, RenderScheduler, ResizeDecision, TickOutcome};
pub use session::RenderSession;
pub use view::{AlbumView, PageIndicator};
pub use widget::{
    FlipEvent, FlipHandler, Flipbook, FlipbookFactory, FlipbookSettings, SizeMode, WidgetError,
};
