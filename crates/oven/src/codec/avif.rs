//! AVIF decoding from memory.
//!
//! The `image` crate's `"avif"` feature only provides the encoder (rav1e);
//! its decoder needs the dav1d C library. AVIF input is decoded here with
//! `avif-parse` for the container and `rav1d` for the AV1 bitstreams: the
//! color item and, when present, the auxiliary alpha item.

use super::CodecError;
use avif_parse::AvifData;
use image::{DynamicImage, RgbImage, RgbaImage};
use rav1d::include::dav1d::data::Dav1dData;
use rav1d::include::dav1d::dav1d::Dav1dSettings;
use rav1d::include::dav1d::headers::{
    DAV1D_PIXEL_LAYOUT_I400, DAV1D_PIXEL_LAYOUT_I420, DAV1D_PIXEL_LAYOUT_I422,
    DAV1D_PIXEL_LAYOUT_I444,
};
use rav1d::include::dav1d::picture::Dav1dPicture;
use rav1d::src::lib as dav1d;
use std::io::Cursor;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

fn read_container(data: &[u8]) -> Result<AvifData, CodecError> {
    avif_parse::read_avif(&mut Cursor::new(data))
        .map_err(|e| CodecError::Decode(format!("invalid AVIF container: {e:?}")))
}

/// Read AVIF dimensions from the container without decoding pixels.
pub(crate) fn dimensions(data: &[u8]) -> Result<(u32, u32), CodecError> {
    let meta = read_container(data)?
        .primary_item_metadata()
        .map_err(|e| CodecError::Decode(format!("invalid AVIF metadata: {e:?}")))?;
    Ok((meta.max_frame_width.get(), meta.max_frame_height.get()))
}

/// Decode the primary AVIF item to 8-bit RGB, or RGBA if it has an alpha item.
pub(crate) fn decode(data: &[u8]) -> Result<DynamicImage, CodecError> {
    let avif = read_container(data)?;
    let color = decode_frame(&avif.primary_item)?;
    let (width, height) = (color.width as u32, color.height as u32);
    let rgb = color.to_rgb();

    let Some(alpha_item) = avif.alpha_item.as_deref() else {
        return RgbImage::from_raw(width, height, rgb)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(wrong_size);
    };

    let alpha = decode_frame(alpha_item)?;
    if (alpha.width, alpha.height) != (color.width, color.height) {
        return Err(CodecError::Decode(format!(
            "AVIF alpha plane is {}x{}, color image is {width}x{height}",
            alpha.width, alpha.height
        )));
    }

    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for (px, a) in rgb.chunks_exact(3).zip(alpha.to_luma()) {
        let [r, g, b] = if avif.premultiplied_alpha {
            unpremultiply([px[0], px[1], px[2]], a)
        } else {
            [px[0], px[1], px[2]]
        };
        rgba.extend_from_slice(&[r, g, b, a]);
    }

    RgbaImage::from_raw(width, height, rgba)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(wrong_size)
}

fn wrong_size() -> CodecError {
    CodecError::Decode("decoded AVIF buffer has the wrong size".into())
}

fn unpremultiply(rgb: [u8; 3], alpha: u8) -> [u8; 3] {
    if alpha == 0 {
        return [0, 0, 0];
    }
    rgb.map(|c| ((u32::from(c) * 255 + u32::from(alpha) / 2) / u32::from(alpha)).min(255) as u8)
}

/// Owns a decoder handle and runs `release` on it when dropped.
struct Release<T, F: FnMut(&mut T)> {
    handle: T,
    release: F,
}

impl<T, F: FnMut(&mut T)> Release<T, F> {
    fn new(handle: T, release: F) -> Self {
        Self { handle, release }
    }
}

impl<T, F: FnMut(&mut T)> Deref for Release<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.handle
    }
}

impl<T, F: FnMut(&mut T)> DerefMut for Release<T, F> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.handle
    }
}

impl<T, F: FnMut(&mut T)> Drop for Release<T, F> {
    fn drop(&mut self) {
        (self.release)(&mut self.handle);
    }
}

fn check(code: i32, step: &str) -> Result<(), CodecError> {
    if code == 0 {
        Ok(())
    } else {
        Err(CodecError::Decode(format!("rav1d {step} failed ({code})")))
    }
}

/// Decode one AV1 still frame and copy its planes out of the decoder.
fn decode_frame(av1: &[u8]) -> Result<Frame, CodecError> {
    let mut settings = std::mem::MaybeUninit::<Dav1dSettings>::uninit();
    let settings_ptr = NonNull::new(settings.as_mut_ptr())
        .ok_or_else(|| CodecError::Decode("rav1d settings allocation failed".into()))?;
    // SAFETY: dav1d_default_settings writes every field
    unsafe { dav1d::dav1d_default_settings(settings_ptr) };
    let mut settings = unsafe { settings.assume_init() };
    settings.n_threads = 1;
    settings.max_frame_delay = 1;

    // Declared first so it is closed after the data and picture below are released
    let mut ctx = Release::new(None, |ctx: &mut Option<_>| {
        if ctx.is_some() {
            unsafe { dav1d::dav1d_close(NonNull::new(ctx)) };
        }
    });
    let rc = unsafe { dav1d::dav1d_open(NonNull::new(&mut *ctx), NonNull::new(&mut settings)) };
    check(rc.0, "open")?;

    let mut input = Release::new(Dav1dData::default(), |data: &mut Dav1dData| unsafe {
        dav1d::dav1d_data_unref(NonNull::new(data))
    });
    let buf = unsafe { dav1d::dav1d_data_create(NonNull::new(&mut *input), av1.len()) };
    if buf.is_null() {
        return Err(CodecError::Decode("rav1d data_create failed".into()));
    }
    // SAFETY: data_create returned a writable buffer of av1.len() bytes
    unsafe { std::ptr::copy_nonoverlapping(av1.as_ptr(), buf, av1.len()) };

    let rc = unsafe { dav1d::dav1d_send_data(*ctx, NonNull::new(&mut *input)) };
    check(rc.0, "send_data")?;

    let mut raw: Dav1dPicture = unsafe { std::mem::zeroed() };
    let rc = unsafe { dav1d::dav1d_get_picture(*ctx, NonNull::new(&mut raw)) };
    check(rc.0, "get_picture")?;
    let pic = Release::new(raw, |pic: &mut Dav1dPicture| unsafe {
        dav1d::dav1d_picture_unref(NonNull::new(pic))
    });

    Frame::copy_from(&pic)
}

/// YCbCr to RGB matrix, from the AV1 `matrix_coefficients` code.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Matrix {
    /// Planes hold G, B, R directly.
    Identity,
    /// Luma weights `(kr, kb)`.
    YCbCr { kr: f32, kb: f32 },
}

impl Matrix {
    const BT601: Matrix = Matrix::YCbCr { kr: 0.299, kb: 0.114 };

    fn from_av1(code: u32) -> Self {
        match code {
            0 => Matrix::Identity,
            1 => Matrix::YCbCr {
                kr: 0.2126,
                kb: 0.0722,
            },
            7 => Matrix::YCbCr {
                kr: 0.212,
                kb: 0.087,
            },
            9 | 10 => Matrix::YCbCr {
                kr: 0.2627,
                kb: 0.0593,
            },
            // 2 (unspecified), 5 and 6 (BT.601) and anything exotic
            _ => Matrix::BT601,
        }
    }
}

/// A decoded frame with samples widened to u16.
struct Frame {
    width: usize,
    height: usize,
    bpc: u32,
    /// Chroma subsampling: horizontal, vertical (I420 = true, true)
    ss_x: bool,
    ss_y: bool,
    monochrome: bool,
    full_range: bool,
    matrix: Matrix,
    y: Vec<u16>,
    u: Vec<u16>,
    v: Vec<u16>,
}

impl Frame {
    fn copy_from(pic: &Dav1dPicture) -> Result<Self, CodecError> {
        let width = pic.p.w as usize;
        let height = pic.p.h as usize;
        let bpc = pic.p.bpc as u32;
        let layout = pic.p.layout;
        let high_bitdepth = bpc > 8;

        let (ss_x, ss_y, monochrome) = match layout {
            DAV1D_PIXEL_LAYOUT_I400 => (false, false, true),
            DAV1D_PIXEL_LAYOUT_I420 => (true, true, false),
            DAV1D_PIXEL_LAYOUT_I422 => (true, false, false),
            DAV1D_PIXEL_LAYOUT_I444 => (false, false, false),
            _ => {
                return Err(CodecError::Decode(format!(
                    "unsupported AVIF pixel layout: {layout}"
                )))
            }
        };

        let y_plane = pic.data[0]
            .ok_or_else(|| CodecError::Decode("AVIF picture has no luma plane".into()))?;
        // SAFETY: the luma plane holds `height` rows of `stride[0]` bytes
        let y = unsafe {
            copy_plane(y_plane.as_ptr() as *const u8, pic.stride[0], width, height, high_bitdepth)
        };

        let (u, v) = if monochrome {
            (Vec::new(), Vec::new())
        } else {
            let chroma_width = if ss_x { width.div_ceil(2) } else { width };
            let chroma_height = if ss_y { height.div_ceil(2) } else { height };
            let (Some(u_plane), Some(v_plane)) = (pic.data[1], pic.data[2]) else {
                return Err(CodecError::Decode("AVIF picture has no chroma planes".into()));
            };
            // SAFETY: chroma planes hold subsampled rows of `stride[1]` bytes
            unsafe {
                (
                    copy_plane(
                        u_plane.as_ptr() as *const u8,
                        pic.stride[1],
                        chroma_width,
                        chroma_height,
                        high_bitdepth,
                    ),
                    copy_plane(
                        v_plane.as_ptr() as *const u8,
                        pic.stride[1],
                        chroma_width,
                        chroma_height,
                        high_bitdepth,
                    ),
                )
            }
        };

        let (full_range, matrix) = match pic.seq_hdr {
            // SAFETY: the sequence header lives as long as the picture reference
            Some(hdr) => {
                let hdr = unsafe { hdr.as_ref() };
                (hdr.color_range != 0, Matrix::from_av1(hdr.mtrx as u32))
            }
            None => (true, Matrix::BT601),
        };

        Ok(Self {
            width,
            height,
            bpc,
            ss_x,
            ss_y,
            monochrome,
            full_range,
            matrix,
            y,
            u,
            v,
        })
    }

    fn chroma_width(&self) -> usize {
        if self.ss_x {
            self.width.div_ceil(2)
        } else {
            self.width
        }
    }

    /// Offset and scale that map luma samples to 0.0..=1.0 and chroma
    /// samples to -0.5..=0.5.
    fn ranges(&self) -> (f32, f32, f32) {
        let max = ((1u32 << self.bpc) - 1) as f32;
        if self.full_range {
            (0.0, 1.0 / max, 1.0 / max)
        } else {
            let k = (1u32 << (self.bpc - 8)) as f32;
            (16.0 * k, 1.0 / (219.0 * k), 1.0 / (224.0 * k))
        }
    }

    /// Luma plane as 8-bit values; used for alpha items.
    fn to_luma(&self) -> Vec<u8> {
        let (offset, scale, _) = self.ranges();
        self.y
            .iter()
            .map(|&s| to_u8((f32::from(s) - offset) * scale))
            .collect()
    }

    /// Interleaved RGB8.
    fn to_rgb(&self) -> Vec<u8> {
        let (offset, luma_scale, chroma_scale) = self.ranges();
        let center = (1u32 << (self.bpc - 1)) as f32;
        let chroma_width = self.chroma_width();

        let mut rgb = Vec::with_capacity(self.width * self.height * 3);
        for row in 0..self.height {
            for col in 0..self.width {
                let y = f32::from(self.y[row * self.width + col]);

                let [r, g, b] = if self.monochrome {
                    let l = (y - offset) * luma_scale;
                    [l, l, l]
                } else {
                    let c_row = if self.ss_y { row / 2 } else { row };
                    let c_col = if self.ss_x { col / 2 } else { col };
                    let idx = c_row * chroma_width + c_col;
                    let u = f32::from(self.u[idx]);
                    let v = f32::from(self.v[idx]);

                    match self.matrix {
                        Matrix::Identity => [
                            (v - offset) * luma_scale,
                            (y - offset) * luma_scale,
                            (u - offset) * luma_scale,
                        ],
                        Matrix::YCbCr { kr, kb } => {
                            let l = (y - offset) * luma_scale;
                            let cb = (u - center) * chroma_scale;
                            let cr = (v - center) * chroma_scale;
                            let r = l + 2.0 * (1.0 - kr) * cr;
                            let b = l + 2.0 * (1.0 - kb) * cb;
                            let g = (l - kr * r - kb * b) / (1.0 - kr - kb);
                            [r, g, b]
                        }
                    }
                };

                rgb.extend_from_slice(&[to_u8(r), to_u8(g), to_u8(b)]);
            }
        }
        rgb
    }
}

fn to_u8(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Copy `height` rows of `width` samples out of a decoder plane.
///
/// # Safety
///
/// `base` must point to at least `height` rows spaced `stride` bytes apart,
/// each holding `width` samples of one byte, or two bytes if `high_bitdepth`.
unsafe fn copy_plane(
    base: *const u8,
    stride: isize,
    width: usize,
    height: usize,
    high_bitdepth: bool,
) -> Vec<u16> {
    let mut samples = Vec::with_capacity(width * height);
    for row in 0..height {
        let start = base.offset(row as isize * stride);
        if high_bitdepth {
            samples.extend_from_slice(std::slice::from_raw_parts(start as *const u16, width));
        } else {
            samples.extend(
                std::slice::from_raw_parts(start, width)
                    .iter()
                    .map(|&s| u16::from(s)),
            );
        }
    }
    samples
}
