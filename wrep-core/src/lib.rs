pub mod color;
pub mod record;
pub mod ring;
pub mod score;
pub mod stage;
pub mod trial;
pub mod wheel;

pub use color::{BACKGROUND, Rgb};
pub use record::{RecordSink, TrialRecord};
pub use ring::{WHEEL_SIZE, circular_distance, signed_wheel_error};
pub use score::score_error;
pub use stage::{PointerSample, Stage};
pub use trial::{ItemResponse, Trial};
pub use wheel::{ColorWheel, WheelError};
