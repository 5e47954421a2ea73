pub mod confirmation;
pub mod directory;
pub mod geocode;
pub mod map_document;
pub mod offers;
pub mod route;
pub mod session;
