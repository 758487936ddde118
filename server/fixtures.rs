//! Shared state and helpers for handler and router tests.

use std::io::{Cursor, Read};
use std::sync::Arc;

use glyph_recognizer::classify::CLASS_COUNT;
use glyph_recognizer::{
    Channels, Classifier, InkPolarity, InputConvention, NormConfig, NormalizedTensor, Recognizer,
    ValueScale,
};
use image::{DynamicImage, GrayImage, ImageOutputFormat};

use crate::routes::HttpResponse;
use crate::state::AppState;

/// Always puts 0.9 on one class.
pub struct FixedClassifier {
    convention: InputConvention,
    favourite: usize,
}

impl Classifier for FixedClassifier {
    fn input_convention(&self) -> &InputConvention {
        &self.convention
    }

    fn classify(&self, _tensor: &NormalizedTensor) -> glyph_recognizer::Result<Vec<f64>> {
        let mut probs = vec![0.1 / (CLASS_COUNT - 1) as f64; CLASS_COUNT];
        probs[self.favourite] = 0.9;
        Ok(probs)
    }
}

/// Upload-profile state whose classifier always answers 'A'.
pub fn state_with_limit(max_upload_bytes: usize) -> AppState {
    let classifier = FixedClassifier {
        convention: InputConvention {
            height: 64,
            width: 64,
            channels: Channels::Rgb,
            ink: InkPolarity::LightOnDark,
            scale: ValueScale::Unit,
        },
        favourite: 10,
    };
    AppState {
        recognizer: Recognizer::new(Arc::new(classifier), NormConfig::upload()).unwrap(),
        max_upload_bytes,
    }
}

pub fn png(img: GrayImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .unwrap();
    bytes
}

pub fn body_of(resp: HttpResponse) -> (u16, Vec<u8>) {
    let status = resp.status_code().0;
    let mut body = Vec::new();
    resp.into_reader().read_to_end(&mut body).unwrap();
    (status, body)
}

pub fn status_and_json(resp: HttpResponse) -> (u16, serde_json::Value) {
    let (status, body) = body_of(resp);
    (status, serde_json::from_slice(&body).unwrap())
}
