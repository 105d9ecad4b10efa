use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use mola_slist::{ListError, SingleList};

thread_local! {
    static FAIL_ALLOCATIONS: Cell<bool> = const { Cell::new(false) };
}

/// Delegates to the system allocator unless the current thread asked for
/// allocations to fail.
struct FailingAlloc;

unsafe impl GlobalAlloc for FailingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if FAIL_ALLOCATIONS.with(Cell::get) {
            return std::ptr::null_mut();
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static ALLOCATOR: FailingAlloc = FailingAlloc;

fn with_failing_allocations<R>(f: impl FnOnce() -> R) -> R {
    FAIL_ALLOCATIONS.with(|fail| fail.set(true));
    let result = f();
    FAIL_ALLOCATIONS.with(|fail| fail.set(false));
    result
}

#[test]
fn test_insert_reports_out_of_memory_and_leaves_list_intact() {
    let mut list = SingleList::<u64>::default();
    let anchor = list.insert_last(1).unwrap();
    list.insert_last(3).unwrap();

    let results = with_failing_allocations(|| {
        [
            list.insert_first(0),
            list.insert_last(4),
            list.insert_after(Some(&anchor), 2),
            list.insert_before(Some(&anchor), 0),
        ]
    });
    for result in results {
        assert_eq!(result, Err(ListError::OutOfMemory));
    }

    assert_eq!(list.len(), 2);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 3]);

    // Allocation works again once memory is available.
    list.insert_after(Some(&anchor), 2).unwrap();
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
}
