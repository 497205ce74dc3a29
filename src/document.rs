use crate::{
    font::BuiltinFont,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    LayoutError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<BuiltinFont>,
    pub images: Arena<Image>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document. The page is moved into the document and
    /// can no longer be drawn on.
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// The pages of the document, in the order they will be written
    pub fn pages_in_order(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Add a font to the document structure. Fonts are stored "globally" within the
    /// document, such that any page can use them by referring to the returned id.
    pub fn add_font(&mut self, font: BuiltinFont) -> Id<BuiltinFont> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, such that any page can place them by referring to the returned id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first, and nothing is written
    /// to `w` unless rendering succeeded.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), LayoutError> {
        let bytes = self.to_bytes()?;
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }

    /// Seal the document, rendering it to PDF bytes
    pub fn to_bytes(self) -> Result<Vec<u8>, LayoutError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the document, not arena index
        let page_refs: Vec<Ref> = page_order
            .iter()
            .enumerate()
            .map(|(i, _id)| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(LayoutError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A4;

    #[test]
    fn empty_document_still_serializes() {
        let bytes = Document::default().to_bytes().expect("can write document");
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn pages_are_written_in_insertion_order() {
        let mut doc = Document::default();
        let first = doc.add_page(Page::new(A4, None));
        let second = doc.add_page(Page::new(A4, None));
        assert_eq!(doc.page_order, vec![first, second]);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages_in_order().count(), 2);

        let mut out = Vec::new();
        doc.write(&mut out).expect("can write document");
        assert!(out.windows(8).any(|w| w == b"/Count 2"));
    }
}
