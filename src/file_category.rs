/// Extension normalization and media categorization.
///
/// Extensions are normalized in two steps: lowercase, then alias folding
/// (`jpeg` becomes `jpg`, `targa` becomes `tga`, ...). Only normalized
/// extensions listed in the recognized table are processed; everything else
/// is skipped by the classifier.
///
/// # Examples
///
/// ```
/// use folder_rename::file_category::{Category, ExtensionMapper};
///
/// let mapper = ExtensionMapper::default();
/// assert_eq!(mapper.normalize("JPEG"), "jpg");
/// assert_eq!(mapper.category("jpg"), Some(Category::Image));
/// assert_eq!(mapper.category("txt"), None);
/// ```
use std::collections::HashMap;

/// A recognized media category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Still images (JPG, TGA, TIF, ...)
    Image,
    /// Video clips (MP4, MOV, MPG, ...)
    Video,
}

impl Category {
    /// Returns a short lowercase label for this category.
    ///
    /// ```
    /// use folder_rename::file_category::Category;
    ///
    /// assert_eq!(Category::Image.label(), "image");
    /// assert_eq!(Category::Video.label(), "video");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Video => "video",
        }
    }
}

/// Maps raw file extensions to canonical extensions and categories.
#[derive(Debug, Clone)]
pub struct ExtensionMapper {
    alias_map: HashMap<String, String>,
    category_map: HashMap<String, Category>,
}

impl ExtensionMapper {
    /// Creates an empty mapper with no aliases and no recognized extensions.
    pub fn empty() -> Self {
        Self {
            alias_map: HashMap::new(),
            category_map: HashMap::new(),
        }
    }

    /// Creates a mapper populated with the standard media tables.
    pub fn new() -> Self {
        let mut mapper = Self::empty();
        mapper.populate_standard_mappings();
        mapper
    }

    fn populate_standard_mappings(&mut self) {
        self.add_aliases("jpg", &["jpg", "jpeg"]);
        self.add_aliases("tga", &["tga", "targa", "icb", "vda", "vst", "pix"]);
        self.add_aliases("tif", &["tif", "tiff"]);
        self.add_aliases("mpg", &["mpg", "mpeg", "mpe"]);

        for ext in ["jpg", "tga", "tif", "bmp", "gif", "png"] {
            self.add_category_mapping(ext, Category::Image);
        }
        for ext in ["mp4", "mov", "mpg", "wmv", "flv", "webm"] {
            self.add_category_mapping(ext, Category::Video);
        }
    }

    /// Registers aliases that normalize to `canonical`.
    ///
    /// The canonical key always maps to itself, which keeps normalization
    /// idempotent even if it is missing from `aliases`.
    pub fn add_aliases(&mut self, canonical: &str, aliases: &[&str]) {
        let canonical = canonical.to_lowercase();
        self.alias_map.insert(canonical.clone(), canonical.clone());
        for alias in aliases {
            self.alias_map.insert(alias.to_lowercase(), canonical.clone());
        }
    }

    /// Marks a canonical extension as belonging to `category`.
    pub fn add_category_mapping(&mut self, ext: &str, category: Category) {
        self.category_map.insert(ext.to_lowercase(), category);
    }

    /// Normalizes an extension (without leading dot).
    ///
    /// Lowercases and folds aliases. Unknown extensions are returned
    /// lowercased, unchanged otherwise.
    ///
    /// ```
    /// use folder_rename::file_category::ExtensionMapper;
    ///
    /// let mapper = ExtensionMapper::default();
    /// assert_eq!(mapper.normalize("Tiff"), "tif");
    /// assert_eq!(mapper.normalize("icb"), "tga");
    /// assert_eq!(mapper.normalize("TXT"), "txt");
    /// ```
    pub fn normalize(&self, ext: &str) -> String {
        let lower = ext.to_lowercase();
        match self.alias_map.get(&lower) {
            Some(canonical) => canonical.clone(),
            None => lower,
        }
    }

    /// Returns the category of a normalized extension, if recognized.
    pub fn category(&self, normalized_ext: &str) -> Option<Category> {
        self.category_map.get(normalized_ext).copied()
    }

    /// Returns true if the normalized extension is one of the processed media types.
    pub fn is_recognized(&self, normalized_ext: &str) -> bool {
        self.category_map.contains_key(normalized_ext)
    }
}

impl Default for ExtensionMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a file name into stem and extension (extension without the dot).
///
/// Leading dots belong to the stem, so `.DS_Store` has no extension and
/// `archive.tar.gz` has the extension `gz`. A trailing dot yields an empty
/// extension.
///
/// ```
/// use folder_rename::file_category::split_extension;
///
/// assert_eq!(split_extension("a.jpeg"), ("a", Some("jpeg")));
/// assert_eq!(split_extension(".DS_Store"), (".DS_Store", None));
/// assert_eq!(split_extension("README"), ("README", None));
/// ```
pub fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    let leading = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading..].rfind('.') {
        Some(pos) => {
            let dot = leading + pos;
            (&file_name[..dot], Some(&file_name[dot + 1..]))
        }
        None => (file_name, None),
    }
}
