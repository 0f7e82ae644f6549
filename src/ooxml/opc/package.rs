/// Objects that implement reading and writing OPC packages.
///
/// [`OpcPackage`] holds an Open Packaging Convention package in memory: the
/// package-level relationships and every loaded part. Parts only survive a
/// save while they remain reachable from the package relationships, so
/// dropping a relationship is enough to drop the subtree behind it.
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::phys_pkg::{PhysPkgReader, read_package_file};
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

pub struct OpcPackage {
    /// Package-level relationships (`/_rels/.rels`)
    rels: Relationships,

    /// All parts in the package, keyed by partname
    parts: HashMap<String, Box<dyn Part>>,
}

impl OpcPackage {
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: HashMap::new(),
        }
    }

    /// Open a package file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = read_package_file(path)?;
        Self::from_bytes(&data)
    }

    /// Load a package held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut phys_reader = PhysPkgReader::new(data)?;
        let pkg_reader = PackageReader::from_phys_reader(&mut phys_reader)?;
        Self::unmarshal(pkg_reader)
    }

    /// Convert serialized parts and relationships into the in-memory graph.
    fn unmarshal(mut pkg_reader: PackageReader) -> Result<Self> {
        let mut package = Self::new();

        for srel in pkg_reader.take_pkg_srels() {
            let is_external = srel.is_external();
            package
                .rels
                .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
        }

        for spart in pkg_reader.take_sparts() {
            let mut part = PartFactory::load(spart.partname, spart.content_type, spart.blob)?;
            for srel in spart.srels {
                let is_external = srel.is_external();
                part.rels_mut()
                    .add_relationship(srel.reltype, srel.target_ref, srel.r_id, is_external);
            }
            package.add_part(part);
        }

        Ok(package)
    }

    /// Partname of the main document part (`/ppt/presentation.xml` for decks).
    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    pub fn main_document_part(&self) -> Result<&dyn Part> {
        let partname = self.main_document_partname()?;
        self.get_part(&partname)
    }

    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname.as_str())
            .map(|b| &**b as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    pub fn get_part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        self.parts
            .get_mut(partname.as_str())
            .map(|b| &mut **b as &mut dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    #[inline]
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname.as_str())
    }

    /// Add (or replace) a part.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        self.parts.insert(part.partname().to_string(), part);
    }

    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|b| &**b as &dyn Part)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// First free partname for a `%d` template, e.g. `/ppt/slides/slide%d.xml`.
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        for n in 1..=u32::MAX {
            let candidate = PackURI::from_template(template, n)?;
            if !self.contains_part(&candidate) {
                return Ok(candidate);
            }
        }
        Err(OpcError::InvalidPackUri(format!(
            "no free partname for template '{}'",
            template
        )))
    }

    /// Partnames reachable from the package relationships, breadth-first.
    pub fn reachable_partnames(&self) -> Vec<PackURI> {
        let mut order = Vec::with_capacity(self.parts.len());
        let mut visited: HashSet<PackURI> = HashSet::with_capacity(self.parts.len());
        let mut queue: VecDeque<PackURI> = VecDeque::new();

        let visit = |rels: &Relationships, visited: &mut HashSet<PackURI>, queue: &mut VecDeque<PackURI>| {
            for rel in rels.iter().filter(|rel| !rel.is_external()) {
                if let Ok(target) = rel.target_partname() {
                    if self.contains_part(&target) && visited.insert(target.clone()) {
                        queue.push_back(target);
                    }
                }
            }
        };

        visit(&self.rels, &mut visited, &mut queue);
        while let Some(partname) = queue.pop_front() {
            if let Some(part) = self.parts.get(partname.as_str()) {
                visit(part.rels(), &mut visited, &mut queue);
            }
            order.push(partname);
        }

        order
    }

    /// Drop every part no longer reachable through internal relationships.
    /// Returns the removed partnames.
    pub fn prune_unreachable(&mut self) -> Vec<PackURI> {
        let reachable: HashSet<PackURI> = self.reachable_partnames().into_iter().collect();
        let orphaned: Vec<PackURI> = self
            .parts
            .values()
            .map(|part| part.partname().clone())
            .filter(|partname| !reachable.contains(partname))
            .collect();

        for partname in &orphaned {
            self.parts.remove(partname.as_str());
        }
        orphaned
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
