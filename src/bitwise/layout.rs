// Record layout descriptors: an ordered, declarative map of named fields,
// nested records and record arrays at fixed offsets. Layouts are built once
// per model at startup and never mutated. Invalid descriptor tables are a
// config error and panic at construction.

use super::field::{FieldDef, FieldKind};
use super::{CodecError, Result};

/// A nested record or a fixed-size array of records.
#[derive(Debug, Clone)]
pub struct Child {
    pub name: &'static str,
    pub layout: &'static Layout,
    /// `None` for a single nested record.
    pub count: Option<usize>,
    /// Resolved absolute byte offset within the parent.
    pub offset: usize,
}

impl Child {
    fn byte_len(&self) -> usize {
        self.layout.size * self.count.unwrap_or(1)
    }
}

/// A fixed-size record schema.
#[derive(Debug, Clone)]
pub struct Layout {
    name: &'static str,
    size: usize,
    fields: Vec<FieldDef>,
    children: Vec<Child>,
}

impl Layout {
    /// A flat record of scalar fields at explicit byte offsets.
    pub fn record(name: &'static str, size: usize, fields: Vec<FieldDef>) -> Self {
        for f in &fields {
            assert!(
                f.end() <= size,
                "{}.{} extends past the {}-byte record",
                name,
                f.name,
                size
            );
            if let FieldKind::Bits { bit, width } = f.kind {
                assert!(
                    bit + width <= 8 && width > 0,
                    "{}.{} bit range {}+{} invalid",
                    name,
                    f.name,
                    bit,
                    width
                );
            }
        }
        Self {
            name,
            size,
            fields,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Total byte length of one record.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn field(&self, name: &str) -> Result<&FieldDef> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| CodecError::UnknownField(format!("{}.{}", self.name, name)))
    }

    /// Absolute (offset, record size) of `name[index]` within this layout.
    pub fn element_window(&self, name: &str, index: usize) -> Result<(usize, usize)> {
        let child = self
            .children
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CodecError::UnknownField(format!("{}.{}", self.name, name)))?;
        let count = child.count.unwrap_or(1);
        if index >= count {
            return Err(CodecError::Index {
                name: name.to_string(),
                index,
                count,
            });
        }
        Ok((child.offset + index * child.layout.size, child.layout.size))
    }

    /// Resolve a field path such as `"banks[3].bank_channel"` to the field
    /// descriptor and its absolute byte offset within this layout.
    pub fn resolve(&self, path: &str) -> Result<(&FieldDef, usize)> {
        let mut layout = self;
        let mut base = 0usize;
        let segments: Vec<&str> = path.split('.').collect();
        let (last, walk) = segments.split_last().ok_or_else(|| {
            CodecError::UnknownField(path.to_string())
        })?;

        for seg in walk {
            let (name, index) = parse_segment(seg)?;
            let child = layout
                .children
                .iter()
                .find(|c| c.name == name)
                .ok_or_else(|| CodecError::UnknownField(format!("{}.{}", layout.name, name)))?;
            let count = child.count.unwrap_or(1);
            let idx = index.unwrap_or(0);
            if idx >= count {
                return Err(CodecError::Index {
                    name: name.to_string(),
                    index: idx,
                    count,
                });
            }
            base += child.offset + idx * child.layout.size;
            layout = child.layout;
        }

        let (name, index) = parse_segment(last)?;
        if index.is_some() {
            return Err(CodecError::UnknownField(path.to_string()));
        }
        let field = layout.field(name)?;
        Ok((field, base))
    }
}

fn parse_segment(seg: &str) -> Result<(&str, Option<usize>)> {
    match seg.find('[') {
        None => Ok((seg, None)),
        Some(open) => {
            let close = seg.len() - 1;
            if !seg.ends_with(']') || open + 1 >= close {
                return Err(CodecError::UnknownField(seg.to_string()));
            }
            let index = seg[open + 1..close]
                .parse()
                .map_err(|_| CodecError::UnknownField(seg.to_string()))?;
            Ok((&seg[..open], Some(index)))
        }
    }
}

/// Builds a layout from sequentially-placed elements, with optional
/// absolute seek anchors overriding the running offset.
pub struct LayoutBuilder {
    name: &'static str,
    cursor: usize,
    fields: Vec<FieldDef>,
    children: Vec<Child>,
}

impl LayoutBuilder {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cursor: 0,
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Move the running offset to an absolute byte position.
    pub fn seek(mut self, offset: usize) -> Self {
        self.cursor = offset;
        self
    }

    /// A scalar field at the running offset.
    pub fn field(mut self, name: &'static str, len: usize, kind: FieldKind) -> Self {
        self.fields.push(FieldDef::new(name, self.cursor, len, kind));
        self.cursor += len;
        self
    }

    /// A single nested record at the running offset.
    pub fn record(mut self, name: &'static str, layout: &'static Layout) -> Self {
        self.children.push(Child {
            name,
            layout,
            count: None,
            offset: self.cursor,
        });
        self.cursor += layout.size;
        self
    }

    /// A fixed-size array of records at the running offset.
    pub fn array(mut self, name: &'static str, layout: &'static Layout, count: usize) -> Self {
        self.children.push(Child {
            name,
            layout,
            count: Some(count),
            offset: self.cursor,
        });
        self.cursor += layout.size * count;
        self
    }

    pub fn build(self, total_size: usize) -> Layout {
        for f in &self.fields {
            assert!(
                f.end() <= total_size,
                "{}.{} extends past the {}-byte image",
                self.name,
                f.name,
                total_size
            );
        }
        for c in &self.children {
            assert!(
                c.offset + c.byte_len() <= total_size,
                "{}.{} extends past the {}-byte image",
                self.name,
                c.name,
                total_size
            );
        }
        Layout {
            name: self.name,
            size: total_size,
            fields: self.fields,
            children: self.children,
        }
    }
}
