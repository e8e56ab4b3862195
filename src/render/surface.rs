/// Output elements the catalog view writes to.
///
/// The browser build backs this with DOM nodes; [`HtmlSurface`] keeps the
/// fragments in memory so a full page can be rendered from them.
pub trait CatalogSurface {
    /// Replaces the whole stock table body.
    fn replace_table_body(&mut self, html: String);

    /// Sets the "filtered" and "total" counters.
    fn set_counters(&mut self, shown: usize, total: usize);

    /// Replaces the options of the category control.
    fn set_category_options(&mut self, html: String);
}

/// In-memory surface holding the latest fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSurface {
    /// Rows of the stock table body
    pub table_body: String,
    /// `None` until a summary has been rendered
    pub filtered_count: Option<usize>,
    /// `None` until a summary has been rendered
    pub total_count: Option<usize>,
    /// `<option>` elements of the category control
    pub category_options: String,
}

impl HtmlSurface {
    /// Number of `<tr>` rows currently in the table body.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.table_body.matches("<tr").count()
    }
}

impl CatalogSurface for HtmlSurface {
    fn replace_table_body(&mut self, html: String) {
        self.table_body = html;
    }

    fn set_counters(&mut self, shown: usize, total: usize) {
        self.filtered_count = Some(shown);
        self.total_count = Some(total);
    }

    fn set_category_options(&mut self, html: String) {
        self.category_options = html;
    }
}
