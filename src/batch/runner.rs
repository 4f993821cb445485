//! # 批量执行器
//!
//! 在独立的 rayon 线程池上对文件列表逐个调用处理函数。单个文件失败只记入统计，不中断其余文件。
//! 进度条消息实时显示成功 / 跳过 / 失败计数。
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{CellfitError, Result};
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 单个数据文件的拟合结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 已写出导数文件，附 "输入 -> 输出" 描述
    Success(String),
    /// 导数文件已存在且未要求覆盖
    Skipped(String),
    /// (文件路径, 错误信息)
    Failed(String, String),
}

/// 整批统计，`failures` 按输入顺序排列
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 累加一个文件的结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 已处理的文件数
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 线程池大小
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs = 0` 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理文件列表，结果顺序与输入一致
    pub fn run<F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult>
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Fitting");

        let success_count = AtomicUsize::new(0);
        let skipped_count = AtomicUsize::new(0);
        let failed_count = AtomicUsize::new(0);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| CellfitError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<ProcessResult> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    match &result {
                        ProcessResult::Success(_) => success_count.fetch_add(1, Ordering::Relaxed),
                        ProcessResult::Skipped(_) => skipped_count.fetch_add(1, Ordering::Relaxed),
                        ProcessResult::Failed(..) => failed_count.fetch_add(1, Ordering::Relaxed),
                    };
                    pb.set_message(format!(
                        "ok {} / skip {} / fail {}",
                        success_count.load(Ordering::Relaxed),
                        skipped_count.load(Ordering::Relaxed),
                        failed_count.load(Ordering::Relaxed)
                    ));
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        Ok(results.into_iter().fold(BatchResult::default(), |mut acc, r| {
            acc.merge(r);
            acc
        }))
    }
}
