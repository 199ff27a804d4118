mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod sidebar_layout;
pub use sidebar_layout::SidebarLayout;

mod pages;
pub use pages::{Clients, Dashboard, Modules, Reports, Users, Versions};
