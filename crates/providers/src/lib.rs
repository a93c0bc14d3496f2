pub mod error;
pub mod http;
pub mod knowledge;
pub mod opener;
pub mod weather;

pub use error::ProviderFault;
pub use http::build_http_client;
pub use knowledge::{WikipediaClient, DEFAULT_WIKIPEDIA_API_URL};
pub use opener::SystemOpener;
pub use weather::{OpenWeatherClient, DEFAULT_OPENWEATHER_BASE_URL};
