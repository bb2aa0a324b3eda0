pub mod aiml;
pub mod client;
pub mod luma;
pub mod serper;
