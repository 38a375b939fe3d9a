pub(crate) mod loading;

pub use loading::Loading;
