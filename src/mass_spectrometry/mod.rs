/// Unit conversions between mass to charge ratios and neutral masses
pub mod unit_conversions;
