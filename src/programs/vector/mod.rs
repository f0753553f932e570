mod vector_translate;

pub use vector_translate::{vector_translate, VectorTranslateOptions};
