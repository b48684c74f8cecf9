/// Mock compute device for unit tests
///
/// Wraps a HostComputeDevice so kernels still produce real results, and adds
/// failure injection plus call counters for testing the offload path.

#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[cfg(test)]
use crate::compute::{
    BufferDesc, ComputeBuffer, ComputeDevice, FrustumKernelArgs,
    HostComputeDevice, HostDeviceConfig,
};
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::engine_bail;

// ============================================================================
// Mock Compute Device
// ============================================================================

#[cfg(test)]
pub struct MockComputeDevice {
    inner: HostComputeDevice,
    /// Zero-based allocation number that fails (None = never)
    fail_allocation_at: Mutex<Option<usize>>,
    fail_dispatch: AtomicBool,
    allocation_calls: AtomicUsize,
    dispatch_calls: AtomicUsize,
    /// Descriptors of every buffer requested
    pub requested: Mutex<Vec<BufferDesc>>,
}

#[cfg(test)]
impl MockComputeDevice {
    pub fn new(thread_group_size: u32) -> Self {
        let inner = HostComputeDevice::new(HostDeviceConfig {
            thread_group_size,
            memory_budget: None,
            worker_count: Some(2),
        }).expect("host device");

        Self {
            inner,
            fail_allocation_at: Mutex::new(None),
            fail_dispatch: AtomicBool::new(false),
            allocation_calls: AtomicUsize::new(0),
            dispatch_calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_allocation_at(&self, index: Option<usize>) {
        *self.fail_allocation_at.lock().unwrap() = index;
    }

    pub fn fail_dispatch(&self, fail: bool) {
        self.fail_dispatch.store(fail, Ordering::SeqCst);
    }

    pub fn allocation_calls(&self) -> usize {
        self.allocation_calls.load(Ordering::SeqCst)
    }

    pub fn dispatch_calls(&self) -> usize {
        self.dispatch_calls.load(Ordering::SeqCst)
    }

    pub fn live_buffer_count(&self) -> usize {
        self.inner.live_buffer_count()
    }
}

#[cfg(test)]
impl ComputeDevice for MockComputeDevice {
    fn name(&self) -> &str {
        "mock"
    }

    fn thread_group_size(&self) -> u32 {
        self.inner.thread_group_size()
    }

    fn create_buffer(&self, desc: BufferDesc) -> Result<Box<dyn ComputeBuffer>> {
        let call = self.allocation_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(desc.clone());

        if *self.fail_allocation_at.lock().unwrap() == Some(call) {
            engine_bail!("optim::MockComputeDevice", BackendError,
                "Injected allocation failure (call {})", call);
        }

        self.inner.create_buffer(desc)
    }

    fn dispatch_frustum_kernel(&self, args: &FrustumKernelArgs<'_>, group_count: u32) -> Result<()> {
        self.dispatch_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_dispatch.load(Ordering::SeqCst) {
            engine_bail!("optim::MockComputeDevice", BackendError, "Injected dispatch failure");
        }

        self.inner.dispatch_frustum_kernel(args, group_count)
    }
}
