pub mod phone_format;
