use crate::{Item, SearchGeneration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the search and statistics fetches for `keyword`.
    FetchCatalog {
        generation: SearchGeneration,
        keyword: String,
        page_size: u32,
    },
    /// Hand a watch URL to the external opener.
    OpenReference { url: String },
    /// Serialize `items` (already in display order) and save the document.
    SaveExport { keyword: String, items: Vec<Item> },
}
