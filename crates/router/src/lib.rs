pub mod command_router;
pub mod conversation;
pub mod intent;
pub mod mocks;
pub mod ports;
pub mod responses;
pub mod types;

pub use command_router::CommandRouter;
pub use conversation::{ConversationLog, ConversationRecord, Speaker};
pub use intent::{classify, normalize_address, Intent, IntentKind, INTENT_PRIORITY};
pub use ports::{Clock, KnowledgePort, OpenerPort, Responder, SystemClock, WeatherPort};
pub use types::{ProviderResult, MAX_CHOICES};
