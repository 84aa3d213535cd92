mod notification;
mod pipeline;
