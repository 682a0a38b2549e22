use image_pipeline::clamp_dimension;

use crate::object_storage::QueryParams;

/// Parameters of a single image request, fixed once parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    bucket: String,
    key: String,
    width: u32,
    height: u32,
    passthrough: QueryParams,
}

impl ImageRequest {
    /// Builds a request from the path segments and the raw query pairs
    ///
    /// The first `width` and `height` values are read as unsigned integers and
    /// capped; anything missing or unparseable counts as zero. Every other
    /// parameter is kept for storage, first value winning.
    #[must_use]
    pub fn new(bucket: String, key: String, query: Vec<(String, String)>) -> Self {
        let mut width = None;
        let mut height = None;
        let mut passthrough = QueryParams::new();

        for (name, value) in query {
            match name.as_str() {
                "width" => {
                    width.get_or_insert_with(|| parse_dimension(&value));
                }
                "height" => {
                    height.get_or_insert_with(|| parse_dimension(&value));
                }
                _ => {
                    passthrough.entry(name).or_insert(value);
                }
            }
        }

        Self {
            bucket,
            key,
            width: width.unwrap_or(0),
            height: height.unwrap_or(0),
            passthrough,
        }
    }

    /// Storage bucket
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Requested width after capping, zero when not requested
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Requested height after capping, zero when not requested
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Query parameters forwarded to storage
    #[must_use]
    pub const fn passthrough(&self) -> &QueryParams {
        &self.passthrough
    }

    /// Whether any resizing was asked for
    #[must_use]
    pub const fn wants_resize(&self) -> bool {
        self.width > 0 || self.height > 0
    }
}

fn parse_dimension(value: &str) -> u32 {
    value.parse().map_or(0, clamp_dimension)
}
