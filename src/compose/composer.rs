//! The composition pipeline: catalog, selection, cloning and population.
use crate::config::ComposerConfig;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::pptx::{LayoutInfo, MutablePresentation, Package};
use std::io::Write;
use std::path::Path;

use super::catalog::{SlideCatalog, SlideCatalogEntry, SlideTypeInfo};
use super::cloner::clone_content;
use super::error::{ComposeError, Result};
use super::populate::populate_slide;
use super::report::{CompositionReport, SlideReport};
use super::selector::select;
use super::spec::SlideSpec;

/// Builds presentations out of the annotated slides of a template.
///
/// # Examples
///
/// ```rust,no_run
/// use longan::compose::{Composer, SlideSpec};
/// use longan::config::ComposerConfig;
///
/// let composer = Composer::new(ComposerConfig::default());
/// let specs = vec![
///     SlideSpec::new("title_page").field("title", "Q3 Review"),
///     SlideSpec::new("content")
///         .field("heading", "Highlights")
///         .field("bullets", vec!["Revenue up", "Churn down"]),
///     SlideSpec::new("closing").field("message", "Thank you"),
/// ];
/// let report = composer.compose_named("quarterly", &specs)?;
/// println!("wrote {:?}", report.output);
/// # Ok::<(), longan::compose::ComposeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: ComposerConfig,
}

impl Composer {
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Annotated slides of the template at `template`, in template order.
    pub fn slide_types<P: AsRef<Path>>(&self, template: P) -> Result<Vec<SlideTypeInfo>> {
        let template = template.as_ref();
        ensure_exists(template)?;
        let package = Package::open(template)?;
        Ok(SlideCatalog::build(&package)?.slide_types())
    }

    /// Compose `specs` from the template at `template` and write the result
    /// to `output`.
    ///
    /// The output is written through a temporary file in the destination
    /// directory and renamed into place, so `output` either does not change
    /// or holds the complete presentation.
    pub fn compose<P, Q>(&self, template: P, specs: &[SlideSpec], output: Q) -> Result<CompositionReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let template = template.as_ref();
        let output = output.as_ref();
        ensure_exists(template)?;

        let data = std::fs::read(template)?;
        let (bytes, mut report) = self.compose_bytes(&data, specs)?;
        persist(output, &bytes)?;

        tracing::info!(output = %output.display(), slides = report.slides.len(), "presentation written");
        report.output = Some(output.to_path_buf());
        Ok(report)
    }

    /// Compose from the template called `template` inside the configured
    /// templates directory, writing a freshly named file to the output
    /// directory.
    pub fn compose_named(&self, template: &str, specs: &[SlideSpec]) -> Result<CompositionReport> {
        let template_path = self.config.template_path(template);
        let output = self.config.namer().next_path(template);
        self.compose(template_path, specs, output)
    }

    /// Compose in memory. Returns the presentation bytes and the report.
    pub fn compose_bytes(&self, template: &[u8], specs: &[SlideSpec]) -> Result<(Vec<u8>, CompositionReport)> {
        let span = tracing::info_span!("compose", requested = specs.len());
        let _enter = span.enter();

        let package = Package::from_bytes(template)?;
        let catalog = SlideCatalog::build(&package)?;
        tracing::info!(slide_types = catalog.type_names().len(), annotated = catalog.len(), "template catalogued");

        // Every spec is resolved before the output exists.
        let plan = specs
            .iter()
            .map(|spec| select(&catalog, &spec.slide_type, spec.fields.keys().map(String::as_str)))
            .collect::<Result<Vec<_>>>()?;

        let mut output = MutablePresentation::from_template_bytes(template)?;
        let mut report = CompositionReport::default();

        for (index, (spec, entry)) in specs.iter().zip(plan).enumerate() {
            let span = tracing::info_span!("compose_slide", index, slide_type = %spec.slide_type);
            let _enter = span.enter();

            let layout = resolve_layout(output.layouts(), entry)?.clone();
            let namespaces = package.slide(&entry.slide)?.namespace_declarations();
            let slide_index = output.add_slide(&layout.partname, &namespaces)?;
            let (slide, store) = output
                .slide_with_store(slide_index)
                .ok_or_else(|| OoxmlError::PartNotFound(format!("new slide {}", slide_index)))?;

            let skipped = clone_content(&package, &entry.slide, slide, store)?;
            let fields = populate_slide(slide, &spec.fields, &entry.metadata)?;
            tracing::info!(
                template_index = entry.template_index,
                layout = %layout.name,
                skipped = skipped.len(),
                "slide composed"
            );

            report.slides.push(SlideReport {
                index,
                slide_type: spec.slide_type.clone(),
                template_index: entry.template_index,
                layout: layout.name,
                skipped,
                fields,
            });
        }

        let bytes = output.to_bytes()?;
        tracing::info!(slides = report.slides.len(), skipped = report.skipped_count(), "composition finished");
        Ok((bytes, report))
    }
}

/// The output layout for a new slide copied from `entry`: same name, else
/// same position in its master, else the first layout.
fn resolve_layout<'l>(layouts: &'l [LayoutInfo], entry: &SlideCatalogEntry) -> Result<&'l LayoutInfo> {
    if !entry.layout_name.is_empty() {
        if let Some(layout) = layouts.iter().find(|l| l.name == entry.layout_name) {
            return Ok(layout);
        }
    }
    if let Some(layout) = entry.layout_index.and_then(|index| layouts.iter().find(|l| l.index == index)) {
        tracing::debug!(wanted = %entry.layout_name, used = %layout.name, "layout matched by position");
        return Ok(layout);
    }
    match layouts.first() {
        Some(layout) => {
            tracing::debug!(wanted = %entry.layout_name, used = %layout.name, "falling back to the first layout");
            Ok(layout)
        },
        None => Err(ComposeError::LayoutNotFound {
            layout: entry.layout_name.clone(),
        }),
    }
}

fn ensure_exists(template: &Path) -> Result<()> {
    if template.is_file() {
        Ok(())
    } else {
        Err(ComposeError::TemplateNotFound(template.display().to_string()))
    }
}

/// Write `bytes` to `path` through a temporary file in the same directory.
fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
