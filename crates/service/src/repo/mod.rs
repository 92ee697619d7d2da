pub mod seaorm;

pub use seaorm::SeaOrmStore;
