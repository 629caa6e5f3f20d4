#[derive(Clone)]
pub struct ReviewSettings {
    pub min_rate: i32,
    pub max_rate: i32,
    pub max_description_chars: usize,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            min_rate: 1,
            max_rate: 5,
            max_description_chars: 450,
        }
    }
}

#[derive(Clone)]
pub struct CatalogSettings {
    pub popular_books_limit: usize,
    pub latest_reviews_limit: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            popular_books_limit: 4,
            latest_reviews_limit: 10,
        }
    }
}

#[derive(Clone, Default)]
pub struct AppConfig {
    pub review: ReviewSettings,
    pub catalog: CatalogSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// Settings are passed explicitly (dependency injection) rather than read
// from globals; the request layer holds one AppConfig in its shared state.
