pub mod english;
pub mod japanese;
pub mod levenshtein;
pub mod normalization;
