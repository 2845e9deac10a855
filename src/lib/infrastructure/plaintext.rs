//! HTML to plaintext converters

pub mod html2text;
