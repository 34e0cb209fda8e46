//! Stream Bridge - 异步生产者到同步消费者的字节桥
//!
//! 生产者（供应商的流式响应）按块写入，消费者（音频解码器）以阻塞方式拉取。
//! 每个块原子地进出队列，不拆分也不合并。
//!
//! 状态机: OPEN -> CLOSED（不再写入，已排队的数据继续读出）-> DRAINED（终态，读取立即返回空）
//!
//! 队列没有容量上限，生产者远快于消费者时内存会持续增长。

use bytes::Bytes;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Bridge 错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// 目标缓冲区小于下一个块，块保留在队列中等待重试
    #[error("Buffer is too small, expected at least {required} bytes, but got {available}")]
    BufferTooSmall { required: usize, available: usize },

    #[error("Stream is closed")]
    Closed,
}

impl From<BridgeError> for io::Error {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::BufferTooSmall { .. } => io::Error::new(io::ErrorKind::InvalidInput, err),
            BridgeError::Closed => io::Error::new(io::ErrorKind::BrokenPipe, err),
        }
    }
}

#[derive(Debug, Default)]
struct BridgeState {
    queue: VecDeque<Bytes>,
    closed: bool,
    /// 已交付给消费者的字节数
    position: u64,
}

impl BridgeState {
    fn is_drained(&self) -> bool {
        self.closed && self.queue.is_empty()
    }
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<BridgeState>,
    available: Condvar,
}

/// 单写单读的有序字节通道
///
/// 克隆得到的是同一个通道的句柄，生产者和消费者各持一个
#[derive(Clone, Default)]
pub struct StreamBridge {
    shared: Arc<Shared>,
}

impl StreamBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一个块，返回接受的字节数
    ///
    /// 空块直接丢弃（空读表示流结束）。关闭后写入返回 `BridgeError::Closed`。
    pub fn write(&self, chunk: impl Into<Bytes>) -> Result<usize, BridgeError> {
        let chunk = chunk.into();
        let len = chunk.len();

        let mut state = self.shared.state.lock();
        if state.closed {
            tracing::warn!(bytes = len, "Write to closed stream bridge rejected");
            return Err(BridgeError::Closed);
        }
        if len == 0 {
            return Ok(0);
        }
        state.queue.push_back(chunk);
        drop(state);

        self.shared.available.notify_one();
        tracing::trace!(bytes = len, "Chunk queued");
        Ok(len)
    }

    /// 阻塞读取下一个块
    ///
    /// 流已关闭且队列为空时立即返回空
    pub fn read(&self) -> Bytes {
        let mut state = self.shared.state.lock();
        loop {
            if let Some(chunk) = state.queue.pop_front() {
                state.position += chunk.len() as u64;
                return chunk;
            }
            if state.closed {
                return Bytes::new();
            }
            self.shared.available.wait(&mut state);
        }
    }

    /// 阻塞读取下一个块到 `buf`，返回写入的字节数（0 表示流结束）
    ///
    /// `buf` 放不下下一个块时返回 `BufferTooSmall`，该块不会被消费
    pub fn read_into(&self, buf: &mut [u8]) -> Result<usize, BridgeError> {
        let mut state = self.shared.state.lock();
        loop {
            if let Some(required) = state.queue.front().map(Bytes::len) {
                if buf.len() < required {
                    return Err(BridgeError::BufferTooSmall {
                        required,
                        available: buf.len(),
                    });
                }
                if let Some(chunk) = state.queue.pop_front() {
                    buf[..required].copy_from_slice(&chunk);
                    state.position += required as u64;
                }
                return Ok(required);
            }
            if state.closed {
                return Ok(0);
            }
            self.shared.available.wait(&mut state);
        }
    }

    /// 读取所有剩余数据直到流结束
    pub fn read_to_end(&self) -> Vec<u8> {
        let mut result = Vec::new();
        loop {
            let chunk = self.read();
            if chunk.is_empty() {
                break;
            }
            result.extend_from_slice(&chunk);
        }
        result
    }

    /// 标记流结束，幂等
    ///
    /// 返回 true 表示本次调用完成了状态切换
    pub fn close(&self) -> bool {
        let mut state = self.shared.state.lock();
        if state.closed {
            return false;
        }
        state.closed = true;
        let pending = state.queue.len();
        drop(state);

        self.shared.available.notify_all();
        tracing::debug!(pending_chunks = pending, "Stream bridge closed");
        true
    }

    /// 已交付给消费者的累计字节数
    pub fn position(&self) -> u64 {
        self.shared.state.lock().position
    }

    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// 已关闭且所有块都已读出
    pub fn is_drained(&self) -> bool {
        self.shared.state.lock().is_drained()
    }

    pub fn pending_chunks(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    pub fn is_seekable(&self) -> bool {
        false
    }
}

impl fmt::Debug for StreamBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("StreamBridge")
            .field("pending_chunks", &state.queue.len())
            .field("closed", &state.closed)
            .field("position", &state.position)
            .finish()
    }
}

/// 供同步解码器使用的文件式读取
///
/// `read` 的缓冲区必须不小于供应商的块大小，否则返回 `InvalidInput`。
/// `read_to_end` 按整块追加，不受缓冲区大小限制
impl io::Read for StreamBridge {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf)?)
    }

    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let start = buf.len();
        loop {
            let chunk = StreamBridge::read(self);
            if chunk.is_empty() {
                break;
            }
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.len() - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_chunks_read_in_order() {
        let bridge = StreamBridge::new();
        assert_eq!(bridge.write(&b"abc"[..]).unwrap(), 3);
        assert_eq!(bridge.write(&b"de"[..]).unwrap(), 2);
        assert_eq!(bridge.write(&b"f"[..]).unwrap(), 1);
        bridge.close();

        assert_eq!(&bridge.read()[..], b"abc");
        assert_eq!(&bridge.read()[..], b"de");
        assert_eq!(&bridge.read()[..], b"f");
        for _ in 0..3 {
            assert!(bridge.read().is_empty());
        }
        assert_eq!(bridge.position(), 6);
        assert!(bridge.is_drained());
    }

    #[test]
    fn test_position_only_advances_on_read() {
        let bridge = StreamBridge::new();
        bridge.write(vec![0u8; 10]).unwrap();
        assert_eq!(bridge.position(), 0);
        bridge.read();
        assert_eq!(bridge.position(), 10);
    }

    #[test]
    fn test_read_after_drain_does_not_block() {
        let bridge = StreamBridge::new();
        bridge.close();

        let (tx, rx) = mpsc::channel();
        let reader = bridge.clone();
        thread::spawn(move || {
            let first = reader.read();
            let second = reader.read();
            tx.send((first, second)).unwrap();
        });

        let (first, second) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn test_blocked_reader_wakes_on_write() {
        let bridge = StreamBridge::new();
        let reader = bridge.clone();
        let handle = thread::spawn(move || reader.read());

        thread::sleep(Duration::from_millis(50));
        bridge.write(&b"late"[..]).unwrap();

        assert_eq!(&handle.join().unwrap()[..], b"late");
    }

    #[test]
    fn test_blocked_reader_wakes_on_close() {
        let bridge = StreamBridge::new();
        let reader = bridge.clone();
        let handle = thread::spawn(move || reader.read());

        thread::sleep(Duration::from_millis(50));
        bridge.close();

        assert!(handle.join().unwrap().is_empty());
    }

    #[test]
    fn test_close_keeps_queued_chunks() {
        let bridge = StreamBridge::new();
        bridge.write(&b"one"[..]).unwrap();
        bridge.write(&b"two"[..]).unwrap();
        bridge.close();

        assert!(bridge.is_closed());
        assert!(!bridge.is_drained());
        assert_eq!(bridge.read_to_end(), b"onetwo");
        assert!(bridge.is_drained());
    }

    #[test]
    fn test_concurrent_close_is_idempotent() {
        let bridge = StreamBridge::new();
        bridge.write(&b"data"[..]).unwrap();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let b = bridge.clone();
                thread::spawn(move || b.close())
            })
            .collect();
        let transitions = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|closed| *closed)
            .count();

        assert_eq!(transitions, 1);
        assert_eq!(&bridge.read()[..], b"data");
        assert!(bridge.read().is_empty());
    }

    #[test]
    fn test_write_after_close_rejected() {
        let bridge = StreamBridge::new();
        bridge.close();
        assert_eq!(bridge.write(&b"x"[..]), Err(BridgeError::Closed));
        assert_eq!(bridge.pending_chunks(), 0);
    }

    #[test]
    fn test_empty_chunk_is_dropped() {
        let bridge = StreamBridge::new();
        assert_eq!(bridge.write(Bytes::new()).unwrap(), 0);
        assert_eq!(bridge.pending_chunks(), 0);
    }

    #[test]
    fn test_buffer_too_small_preserves_chunk() {
        let bridge = StreamBridge::new();
        bridge.write(&b"hello"[..]).unwrap();
        bridge.close();

        let mut small = [0u8; 3];
        assert_eq!(
            bridge.read_into(&mut small),
            Err(BridgeError::BufferTooSmall {
                required: 5,
                available: 3
            })
        );
        assert_eq!(bridge.position(), 0);
        assert_eq!(bridge.pending_chunks(), 1);

        let mut big = [0u8; 8];
        assert_eq!(bridge.read_into(&mut big), Ok(5));
        assert_eq!(&big[..5], b"hello");
        assert_eq!(bridge.read_into(&mut big), Ok(0));
        assert_eq!(bridge.position(), 5);
    }

    #[test]
    fn test_io_read_adapter() {
        let mut bridge = StreamBridge::new();
        bridge.write(&b"abcd"[..]).unwrap();
        bridge.close();

        let mut small = [0u8; 2];
        let err = Read::read(&mut bridge, &mut small).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let mut buf = [0u8; 16];
        assert_eq!(Read::read(&mut bridge, &mut buf).unwrap(), 4);
        assert_eq!(Read::read(&mut bridge, &mut buf).unwrap(), 0);
        assert!(!bridge.is_seekable());
    }

    #[test]
    fn test_io_read_to_end_takes_whole_chunks() {
        let mut bridge = StreamBridge::new();
        bridge.write(vec![1u8; 100]).unwrap();
        bridge.write(vec![2u8; 16 * 1024]).unwrap();
        bridge.close();

        let mut out = b"head".to_vec();
        let n = Read::read_to_end(&mut bridge, &mut out).unwrap();
        assert_eq!(n, 100 + 16 * 1024);
        assert_eq!(&out[..4], b"head");
        assert!(out[4..104].iter().all(|&b| b == 1));
        assert!(out[104..].iter().all(|&b| b == 2));
        assert!(bridge.is_drained());
        assert_eq!(Read::read_to_end(&mut bridge, &mut out).unwrap(), 0);
    }

    #[test]
    fn test_producer_consumer_threads() {
        let bridge = StreamBridge::new();
        let producer = bridge.clone();
        let writer = thread::spawn(move || {
            for i in 0..100u8 {
                producer.write(vec![i; (i as usize % 7) + 1]).unwrap();
            }
            producer.close();
        });

        let mut received = Vec::new();
        loop {
            let chunk = bridge.read();
            if chunk.is_empty() {
                break;
            }
            received.push(chunk);
        }
        writer.join().unwrap();

        assert_eq!(received.len(), 100);
        for (i, chunk) in received.iter().enumerate() {
            assert_eq!(chunk.len(), (i % 7) + 1);
            assert!(chunk.iter().all(|b| *b as usize == i));
        }
        let total: u64 = received.iter().map(|c| c.len() as u64).sum();
        assert_eq!(bridge.position(), total);
    }
}
