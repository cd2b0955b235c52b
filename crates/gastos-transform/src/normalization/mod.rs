//! Normalization modules for débito fields.

pub mod cnpj;
pub mod datetime;
pub mod numeric;
