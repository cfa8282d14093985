mod reply;
mod slack;

pub use reply::ResponseUrlReplier;
pub use slack::SlackGateway;
