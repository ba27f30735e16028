use crate::{
    refs::{ObjectReferences, RefType},
    Pt, ReportError,
};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// The font-metrics capability consumed by the layout engine: glyph advance
/// widths and vertical extents at a given font size.
///
/// [Font] implements this for real TTF/OTF faces. Anything that can answer
/// these questions can drive text fitting; a typeface that is not backed by
/// a parsed face (`as_font` returns [None]) can measure text but cannot be
/// drawn by the PDF renderer.
pub trait Typeface {
    /// The distance from the baseline to the top of the tallest glyphs, at
    /// the given font size
    fn ascent(&self, size: Pt) -> Pt;

    /// The distance from the baseline to the bottom of the deepest glyphs,
    /// at the given font size. Note: this is zero or negative.
    fn descent(&self, size: Pt) -> Pt;

    /// The advance width of a single character at the given font size.
    /// Characters without a glyph advance by the width of the replacement
    /// character, or not at all.
    fn advance(&self, ch: char, size: Pt) -> Pt;

    /// The advance width of a string of text at the given font size: the
    /// sum of the individual glyph advances. No shaping or kerning.
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }

    /// The parsed font face behind this typeface, if there is one. The PDF
    /// renderer needs the real face for glyph encoding and embedding.
    fn as_font(&self) -> Option<&Font> {
        None
    }
}

/// A parsed font. Fonts can be TTF or OTF and are embedded in their entirety
/// in the generated PDF, so large fonts may dramatically increase the size
/// of the output.
///
/// Fonts are shared by reference (`Rc<Font>`) between the
/// [FontMetrics](crate::FontMetrics) instances that measure with them and
/// the renderer that embeds them.
pub struct Font {
    face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the face could not
    /// be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, ReportError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// Obtain the full name of the font, if the face records one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if the face records one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// The glyph id of a character in this face, if the face covers it
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph id to encode when a character has no glyph: the Unicode
    /// replacement character if the face covers it, else '?'
    pub fn fallback_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    /// Map every glyph the face's unicode cmap subtables cover back to a
    /// representative character
    fn glyph_map(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();
        let cmap = match self.face.as_face_ref().tables().cmap {
            Some(cmap) => cmap,
            None => return map,
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }
        map
    }

    /// Advance width of every mapped glyph, in font units
    fn glyph_advances(&self, map: &HashMap<u16, char>) -> HashMap<u16, u16> {
        let face = self.face.as_face_ref();
        let mut advances: HashMap<u16, u16> = HashMap::with_capacity(map.len());
        for (&gid, _) in map.iter() {
            if let Some(advance) = face.glyph_hor_advance(owned_ttf_parser::GlyphId(gid)) {
                advances.insert(gid, advance);
            }
        }
        advances
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let advances = self.glyph_advances(&self.glyph_map());
        let max_width = advances.values().copied().max().unwrap_or_default() as f32 * scaling;
        let avg_width = if advances.is_empty() {
            0.0
        } else {
            advances.values().map(|&w| w as f32).sum::<f32>() / advances.len() as f32 * scaling
        };

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let name = self.name().unwrap_or_else(|| format!("F{font_index}"));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::empty();
        if face.is_monospaced() {
            flags.set(FontFlags::FIXED_PITCH, true);
        }
        if face.is_italic() {
            flags.set(FontFlags::ITALIC, true);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(face.x_height().unwrap_or_default() as f32 * scaling);
        // ttf-parser has no reliable source for the vertical stem width
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.missing_width(max_width);
        descriptor.font_file2(data_id);

        id
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);

        let scaling = 1000.0 / self.face.as_face_ref().units_per_em() as f32;
        let advances = self.glyph_advances(&self.glyph_map());
        let mut gid_widths: Vec<(u16, f32)> = advances
            .iter()
            .map(|(&gid, &advance)| (gid, advance as f32 * scaling))
            .collect();
        gid_widths.sort_by_key(|&(gid, _)| gid);

        // group consecutive glyph ids into blocks so the widths array stays
        // compact
        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);
        let mut start_gid: u16 = 0;
        let mut block: Vec<f32> = Vec::new();
        for (gid, width) in gid_widths.into_iter() {
            if block.is_empty() {
                start_gid = gid;
            } else if (gid - start_gid) as usize != block.len() {
                let done: Vec<f32> = block.drain(..).collect();
                widths.consecutive(start_gid, done);
                start_gid = gid;
            }
            block.push(width);
        }
        if !block.is_empty() {
            widths.consecutive(start_gid, block);
        }
        widths.finish();

        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut pairs: Vec<(u16, char)> = self.glyph_map().into_iter().collect();
        pairs.sort_by_key(|&(gid, _)| gid);

        // bfchar sections are limited to 100 entries apiece
        for chunk in pairs.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for &(gid, ch) in chunk {
                cmap.push_str(&format!("<{gid:04x}> <{:04x}>\n", u32::from(ch)));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

impl Typeface for Font {
    fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().descender() as f32
    }

    fn advance(&self, ch: char, size: Pt) -> Pt {
        let face = self.face.as_face_ref();
        let gid = self
            .glyph_id(ch)
            .or_else(|| self.fallback_glyph_id())
            .map(owned_ttf_parser::GlyphId);
        match gid {
            Some(gid) => {
                self.scaling(size) * face.glyph_hor_advance(gid).unwrap_or_default() as f32
            }
            None => Pt(0.0),
        }
    }

    fn as_font(&self) -> Option<&Font> {
        Some(self)
    }
}
