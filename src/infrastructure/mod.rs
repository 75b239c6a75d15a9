pub mod container;
pub mod external_services;
