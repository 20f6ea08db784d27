pub mod custom_make_span;
