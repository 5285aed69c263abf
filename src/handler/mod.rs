mod service;
mod types;

pub use service::{HandlerSettings, RequestHandler};
pub use types::{
    ImagePayload, InferenceRequest, InferenceResponse, InvocationContext, InvocationEvent,
    InvocationResponse, MISSING_IMAGE_MESSAGE, parse_predictions,
};
