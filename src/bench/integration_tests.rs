//! Integration tests driving both runners over the same generated inputs

#[cfg(test)]
mod tests {
    use crate::bench::{ParallelRunner, SequentialRunner};
    use crate::pipeline::{BoxBlur, ItemProcessor};
    use crate::BlurBenchError;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::tempdir;
    use tokio::sync::mpsc;

    fn write_fixtures(dir: &Path) -> Vec<String> {
        RgbImage::from_fn(32, 20, |x, y| Rgb([(x * 8) as u8, (y * 12) as u8, ((x + y) * 4) as u8]))
            .save(dir.join("a.png"))
            .unwrap();
        RgbaImage::from_fn(17, 23, |x, y| Rgba([(y * 10) as u8, 200, (x * 14) as u8, 255]))
            .save(dir.join("b.png"))
            .unwrap();
        RgbImage::from_fn(40, 8, |x, _| if x % 2 == 0 { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) })
            .save(dir.join("c.png"))
            .unwrap();

        crate::io::list_source_files(dir).unwrap()
    }

    #[tokio::test]
    async fn test_parallel_outputs_match_sequential() {
        let source = tempdir().unwrap();
        let out = tempdir().unwrap();
        let files = write_fixtures(source.path());
        assert_eq!(files, vec!["a.png", "b.png", "c.png"]);

        let processor = ItemProcessor::new(source.path(), BoxBlur::new(3));
        let seq_dir = out.path().join("out_seq");
        let par_dir = out.path().join("out_par");

        let (tx, _rx) = mpsc::channel(16);
        let seq = SequentialRunner::new(processor.clone(), &seq_dir)
            .run(&files, tx)
            .await
            .unwrap();

        let (tx, _rx) = mpsc::channel(16);
        let par = ParallelRunner::new(processor, &par_dir, 2)
            .unwrap()
            .run(&files, tx)
            .await
            .unwrap();

        assert_eq!(seq.files_processed, par.files_processed);
        assert_eq!(par.worker_count, Some(2));

        for name in &files {
            let source_img = image::open(source.path().join(name)).unwrap();
            let seq_img = image::open(seq_dir.join(name)).unwrap();
            let par_img = image::open(par_dir.join(name)).unwrap();

            assert_eq!(seq_img.dimensions(), source_img.dimensions());
            assert_eq!(seq_img.to_rgba8().as_raw(), par_img.to_rgba8().as_raw());
        }
    }

    #[tokio::test]
    async fn test_outputs_are_blurred() {
        let source = tempdir().unwrap();
        let out = tempdir().unwrap();
        let files = write_fixtures(source.path());

        let seq_dir = out.path().join("out_seq");
        let (tx, _rx) = mpsc::channel(16);
        SequentialRunner::new(ItemProcessor::new(source.path(), BoxBlur::new(2)), &seq_dir)
            .run(&files, tx)
            .await
            .unwrap();

        // Alternating stripes average out to a mid grey
        let blurred = image::open(seq_dir.join("c.png")).unwrap().to_rgb8();
        let center = blurred.get_pixel(20, 4)[0];
        assert!(center > 60 && center < 200, "center value {}", center);
    }

    #[tokio::test]
    async fn test_single_worker_matches_sequential() {
        let source = tempdir().unwrap();
        let out = tempdir().unwrap();
        let files = write_fixtures(source.path());
        let processor = ItemProcessor::new(source.path(), BoxBlur::new(1));

        let (tx, _rx) = mpsc::channel(16);
        SequentialRunner::new(processor.clone(), out.path().join("s"))
            .run(&files, tx)
            .await
            .unwrap();

        let (tx, mut rx) = mpsc::channel(16);
        let par = ParallelRunner::new(processor, out.path().join("p"), 1)
            .unwrap()
            .run(&files, tx)
            .await
            .unwrap();

        assert_eq!(par.worker_count, Some(1));

        // One worker completes jobs in submission order
        let mut order = Vec::new();
        while let Some(update) = rx.recv().await {
            order.push(update.file_id);
        }
        assert_eq!(order, files);
    }

    #[tokio::test]
    async fn test_both_runners_fail_on_non_image() {
        let source = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_fixtures(source.path());
        std::fs::write(source.path().join("notes.txt"), "not an image").unwrap();
        let files = crate::io::list_source_files(source.path()).unwrap();
        let processor = ItemProcessor::new(source.path(), BoxBlur::new(1));

        let (tx, _rx) = mpsc::channel(16);
        let seq = SequentialRunner::new(processor.clone(), out.path().join("s"))
            .run(&files, tx)
            .await;
        assert!(matches!(seq, Err(BlurBenchError::DecodeError(_))));

        let (tx, _rx) = mpsc::channel(16);
        let par = ParallelRunner::new(processor, out.path().join("p"), 2)
            .unwrap()
            .run(&files, tx)
            .await;
        assert!(matches!(par, Err(BlurBenchError::DecodeError(_))));
    }
}
