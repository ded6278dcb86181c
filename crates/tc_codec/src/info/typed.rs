use super::TypePath;

/// Doc text of one public field, as recorded by `#[derive(Codec)]`.
#[derive(Debug)]
pub struct FieldSource {
    name: &'static str,
    docs: &'static str,
}

impl FieldSource {
    #[inline]
    pub const fn new(name: &'static str, docs: &'static str) -> Self {
        Self { name, docs }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The doc text the field's tags are parsed from.
    #[inline]
    pub const fn docs(&self) -> &'static str {
        self.docs
    }
}

/// Static description of a derived type: its names, doc text and public
/// fields in declaration order.
///
/// This is the raw input of [`TypeInfo`](super::TypeInfo); tags are not
/// parsed yet.
#[derive(Debug)]
pub struct TypeSource {
    type_path: &'static str,
    type_name: &'static str,
    module_path: Option<&'static str>,
    docs: &'static str,
    fields: &'static [FieldSource],
}

impl TypeSource {
    #[inline]
    pub const fn new(
        type_path: &'static str,
        type_name: &'static str,
        module_path: Option<&'static str>,
        docs: &'static str,
        fields: &'static [FieldSource],
    ) -> Self {
        Self {
            type_path,
            type_name,
            module_path,
            docs,
            fields,
        }
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub const fn module_path(&self) -> Option<&'static str> {
        self.module_path
    }

    #[inline]
    pub const fn docs(&self) -> &'static str {
        self.docs
    }

    #[inline]
    pub const fn fields(&self) -> &'static [FieldSource] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSource> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Types with a static [`TypeSource`].
///
/// Implemented by `#[derive(Codec)]`.
pub trait Typed: TypePath {
    fn type_source() -> &'static TypeSource;
}
