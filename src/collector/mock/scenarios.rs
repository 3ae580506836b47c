//! Pre-built host scenarios for testing.
//!
//! These scenarios provide realistic file contents and command outputs of a
//! small Ubuntu server with two disks.

use super::filesystem::MockFs;
use super::runner::MockRunner;

impl MockFs {
    /// Creates a typical host: `/proc`, `/sys` and `/etc` files the collector
    /// reads, for a root shell on a two-CPU machine.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/cpuinfo",
            "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model name\t: Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz
cpu MHz\t\t: 2399.998
cache size\t: 35840 KB
flags\t\t: fpu vme de pse tsc msr pae
address sizes\t: 46 bits physical, 48 bits virtual

processor\t: 1
vendor_id\t: GenuineIntel
cpu family\t: 6
model name\t: Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz
cpu MHz\t\t: 2400.112
cache size\t: 35840 KB
flags\t\t: fpu vme de pse tsc msr pae
address sizes\t: 46 bits physical, 48 bits virtual
",
        );
        fs.add_file(
            "/proc/cmdline",
            "BOOT_IMAGE=/boot/vmlinuz-5.15.0-91-generic root=UUID=3f1c ro quiet splash\n",
        );
        fs.add_file(
            "/proc/net/softnet_stat",
            "\
0000a1b2 00000000 00000001 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000
0000c3d4 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000 00000000
",
        );
        fs.add_file(
            "/proc/cgroups",
            "\
#subsys_name\thierarchy\tnum_cgroups\tenabled
cpuset\t0\t105\t1
cpu\t0\t105\t1
memory\t0\t105\t1
",
        );
        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file(
            "/proc/vmstat",
            "\
nr_free_pages 1989142
nr_zone_inactive_anon 12
nr_dirty 31
pgfault 73455521
",
        );
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/zoneinfo",
            "\
Node 0, zone      DMA
  per-node stats
      nr_inactive_anon 12
  pages free     3840
",
        );
        fs.add_file(
            "/proc/partitions",
            "\
major minor  #blocks  name

   8        0  488386584 sda
   8        1     524288 sda1
 259        0  976762584 nvme0n1
",
        );
        fs.add_file(
            "/proc/version",
            "Linux version 5.15.0-91-generic (buildd@lcy02-amd64-045) (gcc 11.4.0) #101-Ubuntu SMP\n",
        );
        fs.add_file("/proc/sys/kernel/hostname", "db-01\n");
        fs.add_file(
            "/proc/self/status",
            "Name:\tsysaudit\nPid:\t4242\nPPid:\t4200\nUid:\t0\t0\t0\t0\nGid:\t0\t0\t0\t0\n",
        );

        fs.add_file(
            "/sys/kernel/mm/transparent_hugepage/enabled",
            "always [madvise] never\n",
        );
        fs.add_file(
            "/sys/kernel/mm/transparent_hugepage/defrag",
            "always defer defer+madvise [madvise] never\n",
        );
        fs.add_block_device("/sys", "sda", Some("[mq-deadline] none"));
        fs.add_block_device("/sys", "nvme0n1", Some("[none] mq-deadline"));
        fs.add_block_device("/sys", "loop0", None);
        fs.add_file("/sys/module/intel_idle/parameters/max_cstate", "9\n");

        fs.add_file("/etc/issue", "Ubuntu 22.04.3 LTS \\n \\l\n");
        fs.add_file(
            "/etc/os-release",
            "NAME=\"Ubuntu\"\nVERSION_ID=\"22.04\"\nID=ubuntu\n",
        );
        fs.add_file(
            "/etc/lsb-release",
            "DISTRIB_ID=Ubuntu\nDISTRIB_RELEASE=22.04\n",
        );

        fs
    }
}

impl MockRunner {
    /// Command outputs matching [`MockFs::typical_system`].
    pub fn typical_system() -> Self {
        let mut runner = Self::new();

        runner.add_output(
            "sysctl -a",
            "\
abi.vsyscall32 = 1
fs.file-max = 9223372036854775807
kernel.ostype = Linux
kernel.domainname = (none)
net.core.somaxconn = 4096
net.ipv4.ip_forward = 1
net.ipv4.tcp_rmem = 4096\t131072\t6291456
vm.swappiness = 60
",
        );
        runner.add_output(
            "df -h",
            "\
Filesystem      Size  Used Avail Use% Mounted on
udev            7.8G     0  7.8G   0% /dev
/dev/sda1        50G   20G   28G  42% /
tmpfs           1.6G  2.1M  1.6G   1% /run
",
        );
        runner.add_output(
            "dmesg",
            "[    0.000000] Linux version 5.15.0-91-generic\n[    0.000000] Command line: BOOT_IMAGE=/boot/vmlinuz\n",
        );
        runner.add_output(
            "free -m",
            "\
               total        used        free      shared  buff/cache   available
Mem:           15890        2114       11021          12        2754       13436
Swap:           4095           0        4095
",
        );
        runner.add_output(
            "lsblk",
            "\
NAME    MAJ:MIN RM   SIZE RO TYPE MOUNTPOINTS
loop0     7:0    0  63.9M  1 loop /snap/core20/2105
sda       8:0    0 465.8G  0 disk
└─sda1    8:1    0   512M  0 part /boot/efi
nvme0n1 259:0    0 931.5G  0 disk
",
        );
        runner.add_output(
            "ifconfig",
            "eth0: flags=4163<UP,BROADCAST,RUNNING,MULTICAST>  mtu 1500\n        inet 10.0.0.5  netmask 255.255.255.0\n",
        );
        runner.add_output(
            "ip addr show",
            "1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN\n    inet 127.0.0.1/8 scope host lo\n",
        );
        runner.add_output(
            "netstat -an",
            "Active Internet connections (servers and established)\nProto Recv-Q Send-Q Local Address           Foreign Address         State\ntcp        0      0 0.0.0.0:22              0.0.0.0:*               LISTEN\n",
        );
        runner.add_output(
            "ss -tan",
            "\
State      Recv-Q Send-Q Local Address:Port               Peer Address:Port
LISTEN     0      128          0.0.0.0:22                       0.0.0.0:*
ESTAB      0      0           10.0.0.5:22                     10.0.0.9:51234
",
        );

        runner
    }
}
