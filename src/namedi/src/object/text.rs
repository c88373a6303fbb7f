use std::any::Any;
use std::sync::Arc;

macro_rules! for_all_textual {
    ($render:ident, $value:expr) => {
        $render!(
            $value;
            String, &'static str, Arc<str>, char, bool,
            i8, i16, i32, i64, i128, isize,
            u8, u16, u32, u64, u128, usize,
            f32, f64
        )
    };
}

macro_rules! render_first_match {
    ($value:expr; $($ty:ty),*) => {
        $(
            if let Some(value) = $value.downcast_ref::<$ty>() {
                return Some(value.to_string());
            }
        )*
    };
}

pub(super) fn render(value: &dyn Any) -> Option<String> {
    for_all_textual!(render_first_match, value);
    None
}
