//! Handlebars templates of the generated script's prologue and epilogue.
//!
//! Every global the prologue defines starts with `_depbundle` so it cannot
//! collide with the wrapped script's names, and none starts with a double
//! underscore, which would be mangled inside the class body.

pub const PROLOGUE_TEMPLATE: &str = r##"#!/usr/bin/env python3
# This file was partially generated by depbundle {{version}}.
# Bundled modules: {{modules}}
# Container: {{container_size}} bytes, sha256 {{sha256}}, {{scheme}}

# region depbundle
import atexit as _depbundle_atexit
import hashlib as _depbundle_hashlib
import os as _depbundle_os
import sys as _depbundle_sys
import tempfile as _depbundle_tempfile
from base64 import b85decode as _depbundle_b85decode

_depbundle_payload = """
{{payload}}
"""

_depbundle_dense = {{dense}}
_depbundle_sha256 = "{{sha256}}"
_depbundle_alphabet = '{{alphabet}}'


def _depbundle_b91decode(text):
    table = dict((symbol, index) for index, symbol in enumerate(_depbundle_alphabet))
    value = -1
    buffer = 0
    bits = 0
    out = bytearray()
    for symbol in text:
        if symbol not in table:
            continue
        c = table[symbol]
        if value < 0:
            value = c
            continue
        value += c * 91
        buffer |= value << bits
        bits += 13 if (value & 8191) > 88 else 14
        while True:
            out.append(buffer & 255)
            buffer >>= 8
            bits -= 8
            if not bits > 7:
                break
        value = -1
    if value + 1:
        out.append((buffer | value << bits) & 255)
    return bytes(out)


class _DepbundleMount:
    container_name = "depbundle.zip"

    def __init__(self, payload, dense, digest):
        self.payload = payload
        self.dense = dense
        self.digest = digest
        self.directory = None
        self.container = None

    def decode(self):
        text = self.payload.replace("\n", "")
        if self.dense:
            data = _depbundle_b91decode(text)
        else:
            data = _depbundle_b85decode(text)
        actual = _depbundle_hashlib.sha256(data).hexdigest()
        if actual != self.digest:
            raise RuntimeError(
                "depbundle: container checksum mismatch (expected {}, got {})".format(self.digest, actual)
            )
        return data

    def acquire(self):
        self.directory = _depbundle_tempfile.mkdtemp(prefix="depbundle-")
        try:
            data = self.decode()
            self.container = _depbundle_os.path.join(self.directory, self.container_name)
            with open(self.container, "wb") as handle:
                handle.write(data)
            _depbundle_sys.path.insert(0, self.container)
        except BaseException:
            self.release()
            raise

    def release(self):
        directory, container = self.directory, self.container
        if directory is None:
            return
        self.directory = self.container = None
        if container is not None:
            try:
                _depbundle_sys.path.remove(container)
            except ValueError:
                pass
        try:
            if container is not None and _depbundle_os.path.exists(container):
                _depbundle_os.remove(container)
            _depbundle_os.rmdir(directory)
        except OSError as exc:
            _depbundle_sys.stderr.write("depbundle: cleanup failed: {}\n".format(exc))


_depbundle_mount = _DepbundleMount(_depbundle_payload, _depbundle_dense, _depbundle_sha256)
_depbundle_mount.acquire()
_depbundle_atexit.register(_depbundle_mount.release)

# endregion

# ======================================================================================================================

"##;

pub const EPILOGUE_TEMPLATE: &str = r##"

# ======================================================================================================================
# depbundle cleanup
_depbundle_mount.release()
"##;
