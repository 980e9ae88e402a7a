pub mod biddtos;
pub mod bookingdtos;
pub mod categorydtos;
pub mod common;
pub mod customerdtos;
pub mod jobdtos;
pub mod reviewdtos;
pub mod workerdtos;
