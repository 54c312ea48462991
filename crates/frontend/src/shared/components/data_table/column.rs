use contracts::shared::projection::render_cell;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    pub fn css_class(&self) -> &'static str {
        match self {
            Align::Left => "table__cell--left",
            Align::Right => "table__cell--right",
            Align::Center => "table__cell--center",
        }
    }
}

type Render<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;
type Variant<T> = Arc<dyn Fn(&T) -> &'static str + Send + Sync>;

/// One table column: a header plus a null-safe projection of the row.
pub struct Column<T> {
    pub key: &'static str,
    pub title: &'static str,
    pub min_width: f32,
    pub align: Align,
    render: Render<T>,
    badge: Option<Variant<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            title: self.title,
            min_width: self.min_width,
            align: self.align,
            render: self.render.clone(),
            badge: self.badge.clone(),
        }
    }
}

impl<T> Column<T> {
    pub fn new(
        key: &'static str,
        title: &'static str,
        render: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            title,
            min_width: 120.0,
            align: Align::Left,
            render: Arc::new(render),
            badge: None,
        }
    }

    /// Column whose renderer already produces display text (placeholders included).
    pub fn text(
        key: &'static str,
        title: &'static str,
        render: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, title, move |row| Some(render(row)))
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Render the cell as a badge; `variant` picks "success", "warning", ...
    pub fn badge(mut self, variant: impl Fn(&T) -> &'static str + Send + Sync + 'static) -> Self {
        self.badge = Some(Arc::new(variant));
        self
    }

    pub fn cell(&self, row: &T) -> String {
        render_cell((self.render)(row))
    }

    pub fn badge_variant(&self, row: &T) -> Option<&'static str> {
        self.badge.as_ref().map(|variant| variant(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: Option<String>,
        active: bool,
    }

    #[test]
    fn missing_values_render_placeholder() {
        let column = Column::new("name", "Name", |row: &Row| row.name.clone());
        let row = Row {
            name: None,
            active: true,
        };
        assert_eq!(column.cell(&row), "-");
        assert_eq!(column.badge_variant(&row), None);
    }

    #[test]
    fn badge_variant_comes_from_row() {
        let column = Column::text("status", "Status", |row: &Row| {
            if row.active { "Active" } else { "Inactive" }.to_string()
        })
        .badge(|row: &Row| if row.active { "success" } else { "neutral" })
        .min_width(90.0);

        let row = Row {
            name: Some("x".into()),
            active: false,
        };
        assert_eq!(column.cell(&row), "Inactive");
        assert_eq!(column.badge_variant(&row), Some("neutral"));
        assert_eq!(column.min_width, 90.0);
    }
}
