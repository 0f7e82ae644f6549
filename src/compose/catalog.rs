//! Catalog of the annotated slides of a template, grouped by slide type.
use crate::ooxml::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::Package;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::metadata::{self, FieldDescriptor, SlideMetadata};

/// An annotated template slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideCatalogEntry {
    /// 0-based position of the slide in the template
    pub template_index: usize,
    pub slide: PackURI,
    /// Name of the slide's layout, empty when unnamed
    pub layout_name: String,
    /// Position of the layout inside its slide master's layout list
    pub layout_index: Option<usize>,
    pub metadata: SlideMetadata,
}

/// Summary of one annotated slide, as listed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideTypeInfo {
    pub slide_index: usize,
    pub slide_type: String,
    pub description: String,
    pub placeholders: BTreeMap<String, FieldDescriptor>,
}

/// Template slides grouped by declared slide type.
#[derive(Debug, Clone, Default)]
pub struct SlideCatalog {
    /// slide_type -> entries in template order
    entries: HashMap<String, Vec<SlideCatalogEntry>>,
    /// Slide types in order of first appearance
    order: Vec<String>,
}

impl SlideCatalog {
    /// Scan every slide of `package`. Slides without an annotation are left
    /// out.
    pub fn build(package: &Package) -> Result<Self> {
        let layouts = package.slide_layouts()?;
        let mut catalog = Self::default();

        for (template_index, partname) in package.slide_partnames()?.into_iter().enumerate() {
            let Some(metadata) = metadata::extract(package, &partname)? else {
                continue;
            };

            let slide = package.slide(&partname)?;
            let (layout_name, layout_index) = match slide.layout_partname() {
                Ok(layout_partname) => {
                    let info = layouts.iter().find(|l| l.partname == layout_partname);
                    (
                        info.map(|l| l.name.clone()).unwrap_or_default(),
                        info.map(|l| l.index),
                    )
                },
                Err(_) => (String::new(), None),
            };

            catalog.insert(SlideCatalogEntry {
                template_index,
                slide: partname,
                layout_name,
                layout_index,
                metadata,
            });
        }

        tracing::debug!(
            types = catalog.order.len(),
            slides = catalog.len(),
            "catalog built"
        );
        Ok(catalog)
    }

    fn insert(&mut self, entry: SlideCatalogEntry) {
        let slide_type = entry.metadata.slide_type.clone();
        match self.entries.get_mut(&slide_type) {
            Some(list) => list.push(entry),
            None => {
                self.order.push(slide_type.clone());
                self.entries.insert(slide_type, vec![entry]);
            },
        }
    }

    /// Entries declaring `slide_type`, in template order.
    pub fn candidates(&self, slide_type: &str) -> Option<&[SlideCatalogEntry]> {
        self.entries.get(slide_type).map(Vec::as_slice)
    }

    /// Declared slide types in order of first appearance.
    pub fn type_names(&self) -> &[String] {
        &self.order
    }

    /// Every annotated slide in template order.
    pub fn entries(&self) -> Vec<&SlideCatalogEntry> {
        let mut all: Vec<&SlideCatalogEntry> = self.entries.values().flatten().collect();
        all.sort_by_key(|e| e.template_index);
        all
    }

    pub fn slide_types(&self) -> Vec<SlideTypeInfo> {
        self.entries()
            .into_iter()
            .map(|e| SlideTypeInfo {
                slide_index: e.template_index,
                slide_type: e.metadata.slide_type.clone(),
                description: e.metadata.description.clone(),
                placeholders: e.metadata.placeholders.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
