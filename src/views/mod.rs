pub mod chat;
pub mod docs;
pub mod history;
pub mod pricing;
pub mod profile;
pub mod settings;
pub mod shared;

pub use chat::ChatView;
pub use docs::DocsView;
pub use history::HistoryView;
pub use pricing::PricingView;
pub use profile::ProfileView;
pub use settings::SettingsView;
