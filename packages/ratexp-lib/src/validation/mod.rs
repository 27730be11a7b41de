pub mod same_language;
