use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] image::ImageError),
}

/// How the pixels of an image will be stored in the PDF
#[derive(Clone)]
pub enum RasterData {
    /// A baseline 8-bit JPEG that PDF readers can decode directly, kept byte-for-byte
    DirectlyEmbeddableJpeg { bytes: Vec<u8>, grey: bool },
    /// Anything else, re-encoded on write
    Decoded(DynamicImage),
}

/// A decoded raster image, ready to be placed on pages
#[derive(Clone)]
pub struct Image {
    pub data: RasterData,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    grey: bool,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode an image from an in-memory blob, sniffing its format from the contents
    pub fn from_bytes(data: &[u8]) -> Result<Image, ImageError> {
        let format = image::guess_format(data)?;
        let image = image::load_from_memory_with_format(data, format)?;

        let components = match image.color() {
            ColorType::Rgb8 => Some(3),
            ColorType::L8 => Some(1),
            _ => None,
        };
        // CMYK JPEGs decode as Rgb8, so the frame header decides what gets embedded as-is
        let passthrough = format == ImageFormat::Jpeg
            && components.is_some()
            && jpeg_components(data) == components;

        if !passthrough {
            return Ok(Self::from_dynamic(image));
        }

        // we can embed it directly!
        Ok(Image {
            width: image.width(),
            height: image.height(),
            data: RasterData::DirectlyEmbeddableJpeg {
                bytes: data.to_vec(),
                grey: image.color() == ColorType::L8,
            },
        })
    }

    pub fn from_dynamic(image: DynamicImage) -> Image {
        Image {
            width: image.width(),
            height: image.height(),
            data: RasterData::Decoded(image),
        }
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            RasterData::DirectlyEmbeddableJpeg { bytes, grey } => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                grey: *grey,
                mask: None,
            },
            RasterData::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<_> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let grey = matches!(
                    image.color(),
                    ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16
                );
                let bytes = if grey {
                    compress_to_vec_zlib(image.to_luma8().as_raw(), level)
                } else {
                    compress_to_vec_zlib(image.to_rgb8().as_raw(), level)
                };

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    grey,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        if encoded.grey {
            image.color_space().device_gray();
        } else {
            image.color_space().device_rgb();
        }
        image.bits_per_component(8);

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }

        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

/// Number of colour components declared in a JPEG's start-of-frame header, if one can
/// be found before the image data begins
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut i = 2;
    while i + 1 < data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        match marker {
            // fill bytes
            0xFF => {
                i += 1;
                continue;
            }
            // markers without a length
            0x01 | 0xD0..=0xD7 => {
                i += 2;
                continue;
            }
            // start of scan or end of image before any frame header
            0xDA | 0xD9 => return None,
            _ => {}
        }

        let length = u16::from_be_bytes([*data.get(i + 2)?, *data.get(i + 3)?]) as usize;
        let is_frame = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame {
            // length(2) precision(1) height(2) width(2) components(1)
            return data.get(i + 9).copied();
        }
        i += 2 + length;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_as(image: DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).expect("can encode test image");
        bytes.into_inner()
    }

    #[test]
    fn png_with_alpha_is_decoded_and_masked() {
        let png = encode_as(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 128]))),
            ImageOutputFormat::Png,
        );
        let image = Image::from_bytes(&png).expect("png decodes");
        assert_eq!((image.width, image.height), (4, 2));
        assert!(matches!(image.data, RasterData::Decoded(_)));

        let encoded = image.encode();
        assert_eq!(encoded.filter, Filter::FlateDecode);
        assert!(!encoded.grey);
        assert!(encoded.mask.is_some());
    }

    #[test]
    fn rgb_jpeg_is_embedded_without_reencoding() {
        let jpeg = encode_as(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 10, 10]))),
            ImageOutputFormat::Jpeg(90),
        );
        let image = Image::from_bytes(&jpeg).expect("jpeg decodes");
        match &image.data {
            RasterData::DirectlyEmbeddableJpeg { bytes, grey } => {
                assert_eq!(bytes, &jpeg);
                assert!(!grey);
            }
            RasterData::Decoded(_) => panic!("expected the jpeg to be passed through"),
        }
        assert_eq!(image.encode().filter, Filter::DctDecode);
    }

    #[test]
    fn frame_header_component_count_is_read() {
        let jpeg = encode_as(DynamicImage::new_rgb8(3, 3), ImageOutputFormat::Jpeg(80));
        assert_eq!(jpeg_components(&jpeg), Some(3));

        let grey = encode_as(DynamicImage::new_luma8(3, 3), ImageOutputFormat::Jpeg(80));
        assert_eq!(jpeg_components(&grey), Some(1));

        // SOI, an APP0 segment with two payload bytes, then a baseline SOF for four components
        let cmyk_header = [
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00, 0xFF, 0xC0, 0x00, 0x14, 0x08, 0x00,
            0x08, 0x00, 0x08, 0x04,
        ];
        assert_eq!(jpeg_components(&cmyk_header), Some(4));
    }

    #[test]
    fn missing_frame_headers_are_not_trusted() {
        assert_eq!(jpeg_components(&[0xFF, 0xD8, 0xFF, 0xDA, 0x00, 0x02]), None);
        assert_eq!(jpeg_components(&[0xFF, 0xD8, 0xFF, 0xC0, 0x00]), None);
        assert_eq!(jpeg_components(b"\x89PNG"), None);
    }

    #[test]
    fn garbage_fails_to_decode() {
        let result = Image::from_bytes(b"definitely not an image");
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }
}
