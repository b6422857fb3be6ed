//! A small worker pool that lets frame decoding run off the capture
//! thread: captured frames are handed off over a bounded channel, and
//! whichever worker picks one up emits the reassembled payload (if any)
//! back on a result channel.

use crate::config::Config;
use crate::fountain::FountainDecoderSink;
use crate::fountain::decoder::StreamProgress;
use crossbeam_channel::{Receiver, Sender, bounded};
use image::RgbImage;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// One frame handed off to the worker pool for decoding.
pub struct CapturedFrame {
    /// Sequence number, purely for logging/ordering diagnostics.
    pub index: u64,
    /// The rectified frame image.
    pub image: RgbImage,
}

/// Runs `decode` (typically `FrameReader::read` followed by fountain
/// ingestion) on a small pool of worker threads, so a slow decode never
/// blocks the next frame capture.
pub struct ConcurrentSink {
    sender: Sender<CapturedFrame>,
    results: Receiver<Vec<u8>>,
    workers: Vec<JoinHandle<()>>,
    sink: Arc<Mutex<FountainDecoderSink>>,
}

impl ConcurrentSink {
    /// Spin up `worker_count` threads sharing one [`FountainDecoderSink`],
    /// each running `decode` on frames as they arrive.
    pub fn new<F>(config: Config, worker_count: usize, decode: F) -> Self
    where
        F: Fn(&Config, &RgbImage) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        let (frame_tx, frame_rx) = bounded::<CapturedFrame>(worker_count.max(1) * 2);
        let (result_tx, result_rx) = bounded::<Vec<u8>>(worker_count.max(1) * 2);
        let decode = Arc::new(decode);
        let shared_sink = Arc::new(Mutex::new(FountainDecoderSink::new(&config)));

        let workers = (0..worker_count.max(1))
            .map(|_| {
                let frame_rx = frame_rx.clone();
                let result_tx = result_tx.clone();
                let decode = Arc::clone(&decode);
                let config = config.clone();
                let sink = Arc::clone(&shared_sink);
                thread::spawn(move || {
                    while let Ok(frame) = frame_rx.recv() {
                        log::debug!("decoding frame {}", frame.index);
                        let Some(chunk) = decode(&config, &frame.image) else {
                            continue;
                        };
                        let completed = {
                            let mut sink = sink.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
                            sink.ingest(&chunk)
                        };
                        if let Some(payload) = completed {
                            let _ = result_tx.send(payload);
                        }
                    }
                })
            })
            .collect();

        ConcurrentSink { sender: frame_tx, results: result_rx, workers, sink: shared_sink }
    }

    /// Snapshot of every in-progress stream's reassembly fraction, without
    /// blocking the worker pool.
    #[must_use]
    pub fn progress(&self) -> Vec<StreamProgress> {
        self.sink.lock().unwrap_or_else(std::sync::PoisonError::into_inner).progress()
    }

    /// Hand a captured frame to the pool. Blocks briefly if every worker is
    /// already busy and the queue is full.
    pub fn submit(&self, frame: CapturedFrame) {
        let _ = self.sender.send(frame);
    }

    /// Block until a fully reassembled payload is available, or every
    /// worker has shut down with nothing left to decode.
    #[must_use]
    pub fn recv(&self) -> Option<Vec<u8>> {
        self.results.recv().ok()
    }

    /// Stop accepting frames and wait for in-flight work to finish.
    pub fn shutdown(self) {
        drop(self.sender);
        for worker in self.workers {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn frames_that_fail_to_decode_are_silently_dropped() {
        let config = Config::baseline();
        let sink = ConcurrentSink::new(config, 2, |_, _| None);
        sink.submit(CapturedFrame { index: 0, image: RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])) });
        sink.shutdown();
    }
}
