pub mod trail;
pub mod trail_look;
