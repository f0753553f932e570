//! GDAL Common Portability Library Functions
//!
//! This module provides safe access to a subset of the
//! [GDAL CPL functions](https://gdal.org/api/cpl.html).

use std::ffi::CString;
use std::fmt::{Debug, Formatter};
use std::ptr;

use gdal_sys::{CSLAddString, CSLCount, CSLDestroy, CSLDuplicate};
use libc::c_char;

use crate::errors::Result;
use crate::utils::_string_array;

/// Wraps a [`gdal_sys::CSLConstList`] (a.k.a. `char **papszStrList`). This data
/// structure (a null-terminated array of null-terminated strings) is used
/// throughout GDAL to pass option lists to various functions, including the
/// `argv`-style argument vectors consumed by the `GDAL*OptionsNew` constructors
/// of the utility programs.
///
/// Insertion order is preserved, which matters for command-line style
/// arguments. An empty list is represented by the null pointer, which GDAL
/// treats as a list containing only the terminator.
///
/// See the [`CSL*` GDAL functions](https://gdal.org/api/cpl.html#cpl-string-h)
/// for more details.
pub struct CslStringList {
    list_ptr: *mut *mut c_char,
}

impl CslStringList {
    /// Creates an empty GDAL string list.
    pub fn new() -> Self {
        Self {
            list_ptr: ptr::null_mut(),
        }
    }

    /// Appends `value` to the end of the list.
    ///
    /// Returns `Err` if `value` contains an interior NUL byte.
    pub fn add_string(&mut self, value: &str) -> Result<()> {
        let v = CString::new(value)?;
        self.list_ptr = unsafe { CSLAddString(self.list_ptr, v.as_ptr()) };
        Ok(())
    }

    /// Determine the number of entries in the list.
    pub fn len(&self) -> usize {
        (unsafe { CSLCount(self.as_ptr()) }) as usize
    }

    /// Determine if the list has any values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the entries out into owned strings, in list order.
    pub fn strings(&self) -> Vec<String> {
        _string_array(self.list_ptr)
    }

    /// Get the raw pointer to the underlying data.
    ///
    /// The pointer is null for an empty list, and stays valid for as long as
    /// `self` is neither mutated nor dropped.
    pub fn as_ptr(&self) -> *mut *mut c_char {
        self.list_ptr
    }
}

impl Drop for CslStringList {
    fn drop(&mut self) {
        unsafe { CSLDestroy(self.list_ptr) }
    }
}

impl Default for CslStringList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CslStringList {
    fn clone(&self) -> Self {
        let list_ptr = unsafe { CSLDuplicate(self.list_ptr) };
        Self { list_ptr }
    }
}

impl TryFrom<&[&str]> for CslStringList {
    type Error = crate::errors::GdalError;

    fn try_from(values: &[&str]) -> Result<Self> {
        let mut list = Self::new();
        for v in values {
            list.add_string(v)?;
        }
        Ok(list)
    }
}

impl Debug for CslStringList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.strings()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::cpl::CslStringList;
    use crate::errors::Result;

    fn fixture() -> Result<CslStringList> {
        let mut l = CslStringList::new();
        l.add_string("-of")?;
        l.add_string("GTiff")?;
        l.add_string("-b")?;
        l.add_string("1")?;
        Ok(l)
    }

    #[test]
    fn empty_list_is_null() {
        let l = CslStringList::new();
        assert!(l.is_empty());
        assert!(l.as_ptr().is_null());
        assert!(l.strings().is_empty());
    }

    #[test]
    fn preserves_insertion_order() -> Result<()> {
        let l = fixture()?;
        assert_eq!(l.len(), 4);
        assert_eq!(l.strings(), vec!["-of", "GTiff", "-b", "1"]);
        Ok(())
    }

    #[test]
    fn from_slice() -> Result<()> {
        let l = CslStringList::try_from(["-near", "10"].as_slice())?;
        assert_eq!(l.strings(), vec!["-near", "10"]);
        Ok(())
    }

    #[test]
    fn rejects_interior_nul() {
        let mut l = CslStringList::new();
        assert!(l.add_string("bad\0value").is_err());
    }

    #[test]
    fn clones_deeply() -> Result<()> {
        let l = fixture()?;
        let c = l.clone();
        drop(l);
        assert_eq!(c.len(), 4);
        Ok(())
    }
}
