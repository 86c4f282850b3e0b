/// A trait for reacting to an edit script from the "old" version to
/// the "new" version.
///
/// The Myers implementation reports the script strictly in document order.
/// Hooks that care about merged runs should be wrapped into [`Compact`].
pub trait DiffHook: Sized {
    /// The error produced from the hook methods.
    type Error;

    /// Called when tokens with indices `old_index` (in the old version) and
    /// `new_index` (in the new version) start a section equal in both
    /// versions, of length `len`.
    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        let _ = old_index;
        let _ = new_index;
        let _ = len;
        Ok(())
    }

    /// Called when a section of length `old_len`, starting at `old_index`,
    /// needs to be removed from the old version.
    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        let _ = old_index;
        let _ = old_len;
        let _ = new_index;
        Ok(())
    }

    /// Called when a section of the new version, of length `new_len`
    /// and starting at `new_index`, needs to be inserted at position `old_index`.
    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        let _ = old_index;
        let _ = new_index;
        let _ = new_len;
        Ok(())
    }

    /// Always called at the end of the algorithm.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<'a, D: DiffHook + 'a> DiffHook for &'a mut D {
    type Error = D::Error;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        (*self).equal(old_index, new_index, len)
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        (*self).delete(old_index, old_len, new_index)
    }

    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        (*self).insert(old_index, new_index, new_len)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (*self).finish()
    }
}

/// A [`DiffHook`] that merges adjacent operations into maximal runs.
///
/// All removals and insertions found between two equal sections form one
/// change block.  The block is forwarded as a single `delete` followed by a
/// single `insert`, so the removed side of a change always precedes the
/// added side.
pub struct Compact<D: DiffHook> {
    d: D,
    eq: Option<(usize, usize, usize)>,
    del: Option<(usize, usize, usize)>,
    ins: Option<(usize, usize, usize)>,
}

impl<D: DiffHook> Compact<D> {
    /// Wraps another hook.
    pub fn new(d: D) -> Self {
        Compact {
            d,
            eq: None,
            del: None,
            ins: None,
        }
    }

    /// Extracts the inner hook.
    pub fn into_inner(self) -> D {
        self.d
    }

    fn flush_equal(&mut self) -> Result<(), D::Error> {
        if let Some((old_index, new_index, len)) = self.eq.take() {
            self.d.equal(old_index, new_index, len)?;
        }
        Ok(())
    }

    fn flush_changes(&mut self) -> Result<(), D::Error> {
        let del = self.del.take();
        if let Some((old_index, old_len, new_index)) = del {
            let new_index = match self.ins {
                Some((_, ins_index, _)) => new_index.min(ins_index),
                None => new_index,
            };
            self.d.delete(old_index, old_len, new_index)?;
        }
        if let Some((old_index, new_index, new_len)) = self.ins.take() {
            // the insertion happens after everything this block removed
            let old_index = match del {
                Some((del_index, del_len, _)) => del_index + del_len,
                None => old_index,
            };
            self.d.insert(old_index, new_index, new_len)?;
        }
        Ok(())
    }
}

impl<D: DiffHook> AsRef<D> for Compact<D> {
    fn as_ref(&self) -> &D {
        &self.d
    }
}

impl<D: DiffHook> AsMut<D> for Compact<D> {
    fn as_mut(&mut self) -> &mut D {
        &mut self.d
    }
}

impl<D: DiffHook> DiffHook for Compact<D> {
    type Error = D::Error;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), D::Error> {
        if len == 0 {
            return Ok(());
        }
        self.flush_changes()?;
        self.eq = match self.eq.take() {
            Some((old0, new0, len0)) => Some((old0, new0, len0 + len)),
            None => Some((old_index, new_index, len)),
        };
        Ok(())
    }

    fn delete(&mut self, old_index: usize, old_len: usize, new_index: usize) -> Result<(), D::Error> {
        if old_len == 0 {
            return Ok(());
        }
        self.flush_equal()?;
        self.del = match self.del.take() {
            Some((old0, len0, new0)) => {
                debug_assert_eq!(old_index, old0 + len0);
                Some((old0, len0 + old_len, new0))
            }
            None => Some((old_index, old_len, new_index)),
        };
        Ok(())
    }

    fn insert(&mut self, old_index: usize, new_index: usize, new_len: usize) -> Result<(), D::Error> {
        if new_len == 0 {
            return Ok(());
        }
        self.flush_equal()?;
        self.ins = match self.ins.take() {
            Some((old0, new0, len0)) => {
                debug_assert_eq!(new_index, new0 + len0);
                Some((old0, new0, len0 + new_len))
            }
            None => Some((old_index, new_index, new_len)),
        };
        Ok(())
    }

    fn finish(&mut self) -> Result<(), D::Error> {
        self.flush_equal()?;
        self.flush_changes()?;
        self.d.finish()
    }
}

#[test]
fn test_compact_orders_removals_first() {
    struct D(Vec<String>);
    impl DiffHook for D {
        type Error = ();
        fn equal(&mut self, o: usize, n: usize, len: usize) -> Result<(), ()> {
            self.0.push(format!("equal {:?} {:?} {:?}", o, n, len));
            Ok(())
        }
        fn delete(&mut self, o: usize, len: usize, new: usize) -> Result<(), ()> {
            self.0.push(format!("delete {:?} {:?} {:?}", o, len, new));
            Ok(())
        }
        fn insert(&mut self, o: usize, n: usize, len: usize) -> Result<(), ()> {
            self.0.push(format!("insert {:?} {:?} {:?}", o, n, len));
            Ok(())
        }
    }

    let mut d = Compact::new(D(Vec::new()));
    d.equal(0, 0, 1).unwrap();
    d.equal(1, 1, 2).unwrap();
    d.insert(3, 3, 1).unwrap();
    d.delete(3, 1, 4).unwrap();
    d.insert(4, 4, 1).unwrap();
    d.delete(4, 1, 5).unwrap();
    d.equal(5, 5, 1).unwrap();
    d.finish().unwrap();

    assert_eq!(
        d.into_inner().0,
        vec!["equal 0 0 3", "delete 3 2 3", "insert 5 3 2", "equal 5 5 1"]
    );
}
