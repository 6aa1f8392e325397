pub mod blood_pressure;
pub mod hemoglobin;
pub mod platelets;
pub mod proteinuria;
pub mod symptoms;
