pub mod types;
pub mod interface;
pub mod client;
pub mod error;

pub use types::{
    AudioReply, ButtonsReply, DialogRequest, DialogResponse, ImageReply, Reply, ReplyButton, TextReply,
};
pub use interface::DialogApi;
pub use client::WebhookDialogClient;
pub use error::DialogError;
