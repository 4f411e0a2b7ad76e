pub mod campaign;

pub use campaign::list_campaigns;
