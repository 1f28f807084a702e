pub mod carousel;
pub mod range_slider;
