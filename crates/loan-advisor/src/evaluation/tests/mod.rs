mod common;
mod request;
