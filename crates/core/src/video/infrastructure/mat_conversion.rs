use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::imgproc;
use opencv::prelude::*;

use crate::shared::frame::Frame;

/// Copy an OpenCV capture (BGR, BGRA or gray) into an RGB `Frame`.
pub(crate) fn frame_from_mat(mat: &Mat, index: usize) -> opencv::Result<Frame> {
    let code = match mat.channels() {
        1 => imgproc::COLOR_GRAY2RGB,
        4 => imgproc::COLOR_BGRA2RGB,
        _ => imgproc::COLOR_BGR2RGB,
    };
    let mut rgb = Mat::default();
    imgproc::cvt_color_def(mat, &mut rgb, code)?;

    let width = rgb.cols() as u32;
    let height = rgb.rows() as u32;
    let data = rgb.data_bytes()?.to_vec();
    Ok(Frame::new(data, width, height, 3, index))
}

/// Build a BGR `Mat` owning a copy of an RGB `Frame`.
pub(crate) fn bgr_mat_from_frame(frame: &Frame) -> opencv::Result<Mat> {
    if frame.channels() != 3 {
        return Err(opencv::Error::new(
            opencv::core::StsBadArg,
            format!("expected an RGB frame, got {} channels", frame.channels()),
        ));
    }
    let mut rgb = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        CV_8UC3,
        Scalar::all(0.0),
    )?;
    rgb.data_bytes_mut()?.copy_from_slice(frame.data());

    let mut bgr = Mat::default();
    imgproc::cvt_color_def(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR)?;
    Ok(bgr)
}
