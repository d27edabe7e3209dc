mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod stats;
pub use stats::StatCards;

mod dashboard;
pub use dashboard::DashboardView;

mod portal;
pub use portal::PortalDashboard;
