pub mod explanation;
pub mod field;
pub mod outcome;
pub mod proteinuria;
pub mod recommendation;
pub mod risk;
pub mod symptom;
pub mod vitals;
