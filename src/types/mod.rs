pub mod date_range;
pub mod sunlight_record;
